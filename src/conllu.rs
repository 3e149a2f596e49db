//! CoNLL-U file parsing
//!
//! Reads a stream of sentence blocks into [`Tree`]s, one block per call, in a
//! single forward pass. Columns are mapped to node attributes by a
//! configurable [`Schema`](crate::schema::Schema), so CoNLL-X and other
//! CoNLL-like layouts can be read as well.
//!
//! Parent links and multi-word tokens are deferred until the whole block has
//! been read: a HEAD column may point at a word that appears later in the
//! sentence, and a token range line precedes the words it covers.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::bytes::{is_range, parse_index, split_fields, split_once};
use crate::comment::{Comment, classify};
use crate::schema::{Column, ReaderConfig};
use crate::tree::{Head, Node, Tree};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Lines};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// MISC value marking the placeholder word of a sentence without tokens
pub const EMPTY_SENTENCE_MARKER: &str = "Empty=Yes";

/// Error during CoNLL-U parsing
#[derive(Debug, Error)]
pub enum ReadError {
    /// Strict mode only
    #[error("line {line_num}: expected {expected} columns, found {found} in {line:?}")]
    StructuralMismatch {
        line_num: usize,
        expected: usize,
        found: usize,
        line: String,
    },

    #[error("line {line_num}: head {head} is out of range for a sentence of {node_count} words")]
    HeadOutOfRange {
        line_num: usize,
        head: usize,
        node_count: usize,
    },

    /// A word is its own governor, directly or through other words
    #[error("line {line_num}: head {head} makes the word its own ancestor")]
    HeadCycle { line_num: usize, head: usize },

    #[error(
        "line {line_num}: multi-word token {start}-{end} is out of range for a sentence of {node_count} words"
    )]
    SpanOutOfRange {
        line_num: usize,
        start: usize,
        end: usize,
        node_count: usize,
    },

    #[error("line {line_num}: invalid {column} value {value:?}")]
    InvalidNumber {
        line_num: usize,
        column: &'static str,
        value: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ReadError>;

fn parse_number(value: &str, column: &'static str, line_num: usize) -> Result<usize> {
    parse_index(value).ok_or_else(|| ReadError::InvalidNumber {
        line_num,
        column,
        value: value.to_string(),
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    OnPath,
    Rooted,
}

/// Find a word whose chain of heads never reaches the root
///
/// `heads` holds CoNLL-U head indices, already known to be in range.
fn find_cycle(heads: &[usize]) -> Option<usize> {
    let mut marks = vec![Mark::Unseen; heads.len()];
    let mut path = Vec::new();
    for start in 0..heads.len() {
        let mut id = start;
        loop {
            match marks[id] {
                Mark::Rooted => break,
                Mark::OnPath => return Some(id),
                Mark::Unseen => {}
            }
            marks[id] = Mark::OnPath;
            path.push(id);
            match heads[id] {
                0 => break,
                head => id = head - 1,
            }
        }
        for id in path.drain(..) {
            marks[id] = Mark::Rooted;
        }
    }
    None
}

/// A multi-word token line waiting for the end of its sentence
#[derive(Debug)]
struct PendingToken {
    line_num: usize,
    fields: Vec<String>,
}

impl PendingToken {
    fn span(&self) -> Result<(usize, usize)> {
        let id = self.fields[0].as_str();
        let (start, end) = split_once(id, b'-').unwrap_or((id, ""));
        Ok((
            parse_number(start, "range start", self.line_num)?,
            parse_number(end, "range end", self.line_num)?,
        ))
    }
}

/// Transient state of the sentence being read
#[derive(Debug, Default)]
struct SentenceBuilder {
    tree: Tree,
    /// Head index of each node, in creation order
    heads: Vec<usize>,
    line_nums: Vec<usize>,
    backlog: Vec<PendingToken>,
    comment: String,
}

impl SentenceBuilder {
    fn add_comment(&mut self, line: &str) {
        match classify(line) {
            Comment::SentId(id) => self.tree.sent_id = Some(id.to_string()),
            Comment::Text(text) => self.tree.text = Some(text.to_string()),
            Comment::Free(text) => {
                self.comment.push_str(text);
                self.comment.push('\n');
            }
        }
    }

    fn decode_line(&mut self, line: &str, line_num: usize, config: &ReaderConfig) -> Result<()> {
        let fields = split_fields(line);
        let schema = &config.schema;

        if config.strict && fields.len() != schema.len() {
            return Err(ReadError::StructuralMismatch {
                line_num,
                expected: schema.len(),
                found: fields.len(),
                line: line.to_string(),
            });
        }

        // multi-word tokens are built once the whole sentence is known
        if is_range(fields[0]) {
            trace!(line_num, id = fields[0], "deferring multi-word token");
            self.backlog.push(PendingToken {
                line_num,
                fields: fields.iter().map(|f| f.to_string()).collect(),
            });
            return Ok(());
        }

        let mut node = Node::new(self.tree.len() + 1);
        let mut head = 0;

        // Short lines leave the trailing attributes unset; extra fields are ignored
        for (column, &value) in schema.columns().iter().zip(&fields) {
            match column {
                Column::Ord => node.ord = parse_number(value, "ord", line_num)?,
                Column::Head => head = parse_number(value, "head", line_num)?,
                Column::Deps => node.raw_deps = value.to_string(),
                Column::Ignore => {}
                Column::Form => node.form = value.to_string(),
                Column::Lemma => node.lemma = value.to_string(),
                Column::Upos => node.upos = value.to_string(),
                Column::Xpos => node.xpos = value.to_string(),
                Column::Feats => node.feats = value.to_string(),
                Column::Deprel => node.deprel = value.to_string(),
                Column::Misc => node.misc = value.to_string(),
                Column::Other(name) => {
                    node.extra.insert(name.clone(), value.to_string());
                }
            }
        }

        self.tree.add_node(node);
        self.heads.push(head);
        self.line_nums.push(line_num);
        Ok(())
    }

    /// Resolve deferred links; `None` if the block held no words
    fn finish(self) -> Result<Option<Tree>> {
        let SentenceBuilder {
            mut tree,
            heads,
            line_nums,
            backlog,
            comment,
        } = self;

        if tree.is_empty() {
            return Ok(None);
        }

        // CoNLL-U has no empty sentences; a lone Empty=Yes word stands in for one
        if tree.len() == 1 && tree.descendants()[0].misc == EMPTY_SENTENCE_MARKER {
            tree.pop_node();
        }

        let node_count = tree.len();
        let heads = &heads[..node_count];
        for (&head, &line_num) in heads.iter().zip(&line_nums) {
            if head > node_count {
                return Err(ReadError::HeadOutOfRange {
                    line_num,
                    head,
                    node_count,
                });
            }
        }
        if let Some(id) = find_cycle(heads) {
            return Err(ReadError::HeadCycle {
                line_num: line_nums[id],
                head: heads[id],
            });
        }
        for (id, &head) in heads.iter().enumerate() {
            tree.set_parent(id, Head::from_index(head));
        }

        if !comment.is_empty() {
            tree.comment = Some(comment);
        }

        for token in &backlog {
            let (start, end) = token.span()?;
            let out_of_range = || ReadError::SpanOutOfRange {
                line_num: token.line_num,
                start,
                end,
                node_count,
            };
            if start == 0 || start > end {
                return Err(out_of_range());
            }
            let form = token.fields.get(1).map(String::as_str).unwrap_or_default();
            let mwt = tree
                .create_multiword_token(start - 1..=end - 1, form)
                .ok_or_else(out_of_range)?;
            if let Some(misc) = token.fields.last().filter(|_| token.fields.len() > 1) {
                if misc != "_" {
                    mwt.misc = Some(misc.clone());
                }
            }
        }

        debug!(
            sent_id = ?tree.sent_id,
            words = tree.len(),
            multiword_tokens = tree.multiword_tokens().len(),
            "sentence assembled"
        );
        Ok(Some(tree))
    }
}

/// CoNLL-U reader that iterates over sentences
///
/// Each call to [`read_tree`](Self::read_tree) consumes exactly one sentence
/// block. The reader only moves forward; it never rewinds its source.
pub struct CoNLLUReader<R: BufRead> {
    lines: Option<Lines<R>>,
    config: ReaderConfig,
    line_num: usize,
    exhausted: bool,
}

impl<R: BufRead> CoNLLUReader<R> {
    /// Create a reader over a line source
    ///
    /// An absent source behaves like an empty one.
    pub fn new(source: Option<R>, config: ReaderConfig) -> Self {
        Self {
            exhausted: source.is_none(),
            lines: source.map(BufRead::lines),
            config,
            line_num: 0,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Number of lines consumed so far
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Whether the line source has run out
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let Some(lines) = self.lines.as_mut() else {
            return Ok(None);
        };
        match lines.next() {
            None => {
                self.exhausted = true;
                Ok(None)
            }
            Some(line) => {
                self.line_num += 1;
                Ok(Some(line?))
            }
        }
    }

    /// Consume the rest of the current sentence block
    ///
    /// An I/O error here ends the stream; the caller still gets the error that
    /// triggered the skip.
    fn skip_block(&mut self) {
        loop {
            match self.next_line() {
                Ok(Some(line)) if !line.trim_end().is_empty() => {}
                Ok(_) => break,
                Err(e) => {
                    warn!(line_num = self.line_num, error = %e, "I/O error while skipping a malformed sentence");
                    self.exhausted = true;
                    break;
                }
            }
        }
    }

    /// Read the next sentence block
    ///
    /// Returns `Ok(None)` when the block contains no words, which happens at
    /// the end of the stream and on a stray extra blank line. On a decoding
    /// error the rest of the block is skipped, so reading can resume with the
    /// following sentence.
    pub fn read_tree(&mut self) -> Result<Option<Tree>> {
        let mut sentence = SentenceBuilder::default();

        while let Some(line) = self.next_line()? {
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if line.starts_with('#') {
                sentence.add_comment(line);
                continue;
            }
            if let Err(e) = sentence.decode_line(line, self.line_num, &self.config) {
                self.skip_block();
                return Err(e);
            }
        }

        sentence.finish()
    }
}

impl CoNLLUReader<Box<dyn BufRead + Send>> {
    /// Create a reader from a file path
    ///
    /// Files ending in `.gz` are decompressed on the fly.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        Self::from_file_with(path, ReaderConfig::default())
    }

    pub fn from_file_with(path: &Path, config: ReaderConfig) -> io::Result<Self> {
        let file = File::open(path)?;
        let source: Box<dyn BufRead + Send> =
            if path.extension().is_some_and(|ext| ext == "gz") {
                Box::new(BufReader::new(MultiGzDecoder::new(file)))
            } else {
                Box::new(BufReader::new(file))
            };
        Ok(Self::new(Some(source), config))
    }
}

impl CoNLLUReader<Cursor<String>> {
    /// Create a reader from a string
    pub fn from_string(text: &str) -> Self {
        Self::from_string_with(text, ReaderConfig::default())
    }

    pub fn from_string_with(text: &str, config: ReaderConfig) -> Self {
        Self::new(Some(Cursor::new(text.to_string())), config)
    }
}

impl<R: BufRead> Iterator for CoNLLUReader<R> {
    type Item = Result<Tree>;

    /// Yield the next tree, skipping blocks without words
    ///
    /// I/O errors end the iteration.
    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            match self.read_tree() {
                Ok(Some(tree)) => return Some(Ok(tree)),
                Ok(None) if !self.exhausted => {
                    debug!(line_num = self.line_num, "skipping sentence block without words");
                }
                Ok(None) => {}
                Err(e) => {
                    if matches!(e, ReadError::Io(_)) {
                        self.exhausted = true;
                    }
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
