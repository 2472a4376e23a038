//! Bracketed tree readers and writers.
//!
//! Trees are read in the bracketed notation used by the Penn Treebank and
//! most constituency parsers:
//!
//! ```text
//! (ROOT (S (PPER Er) (VVFIN schläft) ($. .)))
//! ```
//!
//! A tree may span multiple lines and multiple trees may be on one line.

use std::io;
use std::iter::Peekable;
use std::mem;

use syntree::sentence::LeafSentence;
use syntree::tree::Node;

use crate::display::BracketedTree;
use crate::error::{IOError, ParseError};

/// A trait for objects that can read constituency trees.
pub trait ReadTree {
    /// Read a tree from this object.
    ///
    /// # Errors
    ///
    /// A call to `read_tree` may generate an error to indicate that
    /// the operation could not be completed.
    fn read_tree(&mut self) -> Result<Option<Node>, IOError>;

    /// Get an iterator over the trees in this reader.
    fn trees(self) -> Trees<Self>
    where
        Self: Sized,
    {
        Trees { reader: self }
    }
}

/// A reader for bracketed trees.
pub struct Reader<R> {
    read: R,
    buffer: String,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader {
            read,
            buffer: String::new(),
        }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<Node, IOError>;
    type IntoIter = Trees<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees()
    }
}

impl<R: io::BufRead> ReadTree for Reader<R> {
    fn read_tree(&mut self) -> Result<Option<Node>, IOError> {
        let mut line = String::new();

        loop {
            // Skip the offending tokens on errors, so that reading resumes
            // at the next tree.
            let end = match tree_end(&self.buffer) {
                Ok(end) => end,
                Err((err, skip)) => {
                    self.buffer.replace_range(..skip, "");
                    return Err(err.into());
                }
            };

            if let Some(end) = end {
                let tree = parse_tree(&self.buffer[..end]);
                self.buffer.replace_range(..end, "");
                return Ok(Some(tree?));
            }

            line.clear();

            // End of reader.
            if self.read.read_line(&mut line)? == 0 {
                let rest = mem::take(&mut self.buffer);
                if rest.trim().is_empty() {
                    return Ok(None);
                }

                return Err(ParseError::UnterminatedTree {
                    value: rest.trim().to_owned(),
                }
                .into());
            }

            self.buffer.push_str(&line);
        }
    }
}

/// An iterator over the trees in a `Reader`.
pub struct Trees<R>
where
    R: ReadTree,
{
    reader: R,
}

impl<R> Iterator for Trees<R>
where
    R: ReadTree,
{
    type Item = Result<Node, IOError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_tree().transpose()
    }
}

/// Find the end of the first tree in `data`.
///
/// Returns the byte offset after the closing bracket of the first tree,
/// or `None` if the tree is not complete yet. Tokens outside a tree are
/// an error, which is returned together with the offset of the next
/// opening bracket.
fn tree_end(data: &str) -> Result<Option<usize>, (ParseError, usize)> {
    let mut depth = 0usize;
    let mut tokens = Tokens::new(data);

    while let Some((offset, token)) = tokens.next() {
        match token {
            Token::Open => depth += 1,
            Token::Close if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some(offset + 1));
                }
            }
            Token::Close | Token::Atom(_) => {
                let skip = tokens
                    .find(|&(_, token)| token == Token::Open)
                    .map(|(next, _)| next)
                    .unwrap_or_else(|| data.len());
                let value = data[offset..skip].trim().to_owned();

                let err = match token {
                    Token::Atom(_) => ParseError::TokenOutsideTree { value },
                    _ => ParseError::UnexpectedClosingBracket { value },
                };

                return Err((err, skip));
            }
        }
    }

    Ok(None)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

/// Tokenizer for bracketed trees.
///
/// A bracket only opens a node at the start of a token. Within an atom,
/// `(` is an ordinary character, so that tags such as `$(` can be read.
/// Atoms end at whitespace or a closing bracket.
struct Tokens<'a> {
    data: &'a str,
    offset: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a str) -> Self {
        Tokens { data, offset: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.data[self.offset..];
        let start = self.offset + (rest.len() - rest.trim_start().len());
        let rest = &self.data[start..];

        let token = match rest.chars().next()? {
            '(' => Token::Open,
            ')' => Token::Close,
            _ => {
                let len = rest
                    .find(|c: char| c.is_whitespace() || c == ')')
                    .unwrap_or_else(|| rest.len());
                Token::Atom(&rest[..len])
            }
        };

        self.offset = start
            + match token {
                Token::Atom(atom) => atom.len(),
                Token::Open | Token::Close => 1,
            };

        Some((start, token))
    }
}

/// Parse a single tree in bracketed notation.
///
/// The outermost bracket may be unlabeled, as in parser output of the
/// form `( (S ...) )`. The label of the root is then empty.
///
/// ```
/// use bracketed::io::parse_tree;
///
/// let tree = parse_tree("(S (PPER Er) (VVFIN schläft))").unwrap();
/// assert_eq!(tree.label(), "S");
/// assert_eq!(tree.sentence(), "Er schläft ");
/// ```
pub fn parse_tree(data: &str) -> Result<Node, ParseError> {
    let mut tokens = Tokens::new(data).peekable();

    let tree = match tokens.next() {
        Some((_, Token::Open)) => parse_bracket(data, &mut tokens)?,
        Some((_, Token::Close)) => {
            return Err(ParseError::UnexpectedClosingBracket {
                value: data.trim().to_owned(),
            })
        }
        Some((_, Token::Atom(atom))) => {
            return Err(ParseError::TokenOutsideTree {
                value: atom.to_owned(),
            })
        }
        None => return Err(ParseError::MissingTree),
    };

    if let Some((offset, _)) = tokens.next() {
        return Err(ParseError::TrailingContent {
            value: data[offset..].trim().to_owned(),
        });
    }

    Ok(tree)
}

/// Parse the bracket that was just opened, up to its closing bracket.
fn parse_bracket<'a>(
    data: &str,
    tokens: &mut Peekable<impl Iterator<Item = (usize, Token<'a>)>>,
) -> Result<Node, ParseError> {
    let mut current = open_node(tokens);
    let mut ancestors = Vec::new();

    loop {
        match tokens.next() {
            Some((_, Token::Open)) => {
                let child = open_node(tokens);
                ancestors.push(mem::replace(&mut current, child));
            }
            Some((offset, Token::Close)) => {
                if current.label().is_empty() && current.is_terminal() {
                    return Err(ParseError::EmptyBracket {
                        value: context(data, offset),
                    });
                }

                match ancestors.pop() {
                    Some(parent) => {
                        let child = mem::replace(&mut current, parent);
                        current.children_mut().push(child);
                    }
                    None => return Ok(current),
                }
            }
            Some((_, Token::Atom(atom))) => current.children_mut().push(Node::new(atom)),
            None => {
                return Err(ParseError::UnterminatedTree {
                    value: data.trim().to_owned(),
                })
            }
        }
    }
}

/// Start a node, consuming its label when present.
fn open_node<'a>(tokens: &mut Peekable<impl Iterator<Item = (usize, Token<'a>)>>) -> Node {
    match tokens.peek() {
        Some(&(_, Token::Atom(label))) => {
            tokens.next();
            Node::new(label)
        }
        _ => Node::new(""),
    }
}

fn context(data: &str, offset: usize) -> String {
    let start = data[..offset].rfind('(').unwrap_or(0);
    data[start..=offset].to_owned()
}

/// A trait for objects that can write constituency trees.
pub trait WriteTree {
    /// Write a tree into this object.
    ///
    /// # Errors
    ///
    /// A call to `write_tree` may generate an error to indicate that
    /// the operation could not be completed.
    fn write_tree(&mut self, tree: &Node) -> Result<(), IOError>;
}

/// A writer for the sentences spanned by trees.
///
/// Each tree is written as its sequence of tokens on a single line. Every
/// token is followed by a space, see [`LeafSentence`].
pub struct SentenceWriter<W> {
    write: W,
}

impl<W: io::Write> SentenceWriter<W> {
    /// Construct a new writer from an object that implements the `io::Write`
    /// trait.
    pub fn new(write: W) -> SentenceWriter<W> {
        SentenceWriter { write }
    }

    /// Borrow the embedded writer. Getting the underlying writer is often
    /// useful when the writer writes to a memory object.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str;
    ///
    /// use bracketed::io::{parse_tree, SentenceWriter, WriteTree};
    ///
    /// let tree = parse_tree("(S (PPER Er) (VVFIN schläft))").unwrap();
    /// let mut writer = SentenceWriter::new(Vec::new());
    /// writer.write_tree(&tree).unwrap();
    ///
    /// assert_eq!(str::from_utf8(writer.get_ref()).unwrap(), "Er schläft \n");
    /// ```
    pub fn get_ref(&self) -> &W {
        &self.write
    }

    /// Unwrap the embedded writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl<W: io::Write> WriteTree for SentenceWriter<W> {
    fn write_tree(&mut self, tree: &Node) -> Result<(), IOError> {
        writeln!(self.write, "{}", LeafSentence(tree))?;
        Ok(())
    }
}

/// A writer for trees in bracketed notation.
///
/// Each tree is written on a single line.
pub struct TreeWriter<W> {
    write: W,
}

impl<W: io::Write> TreeWriter<W> {
    /// Construct a new writer from an object that implements the `io::Write`
    /// trait.
    pub fn new(write: W) -> TreeWriter<W> {
        TreeWriter { write }
    }

    /// Borrow the embedded writer.
    pub fn get_ref(&self) -> &W {
        &self.write
    }

    /// Unwrap the embedded writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl<W: io::Write> WriteTree for TreeWriter<W> {
    fn write_tree(&mut self, tree: &Node) -> Result<(), IOError> {
        writeln!(self.write, "{}", BracketedTree(tree))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::{BufRead, Cursor, Read};
    use std::str;

    use syntree::tree::Node;

    use super::{parse_tree, ReadTree, SentenceWriter, Tokens, Token, TreeWriter, WriteTree};
    use crate::error::{IOError, ParseError};
    use crate::tests::{read_trees, TEST_TREES};

    static BASIC: &str = "testdata/basic.ptb";

    static MULTILINE: &str = "testdata/multiline.ptb";

    static SENTENCES: &str = "testdata/basic.txt";

    fn read_file(filename: &str) -> Result<String, IOError> {
        let mut f = File::open(filename)?;
        let mut contents = String::new();
        f.read_to_string(&mut contents)?;
        Ok(contents)
    }

    fn string_reader(s: &str) -> Box<dyn BufRead> {
        Box::new(Cursor::new(s.as_bytes().to_owned()))
    }

    fn test_parsing(correct: &[Node], fragment: &str) {
        let trees = read_trees(fragment);
        assert_eq!(correct, trees.as_slice());
    }

    #[test]
    fn tokenizer() {
        let tokens: Vec<_> = Tokens::new(" (NN Haus)").map(|(_, token)| token).collect();
        assert_eq!(
            tokens,
            [
                Token::Open,
                Token::Atom("NN"),
                Token::Atom("Haus"),
                Token::Close
            ]
        );
    }

    #[test]
    fn reader() {
        test_parsing(&*TEST_TREES, BASIC);
    }

    #[test]
    fn reader_multiline() {
        test_parsing(&*TEST_TREES, MULTILINE);
    }

    #[test]
    fn reader_multiple_trees_per_line() {
        let reader = super::Reader::new(string_reader("(NN Haus) (NN Baum)\n\n(NN Katze)"));
        let trees: Vec<_> = reader.trees().map(Result::unwrap).collect();
        assert_eq!(
            trees,
            [
                Node::preterminal("NN", "Haus"),
                Node::preterminal("NN", "Baum"),
                Node::preterminal("NN", "Katze"),
            ]
        );
    }

    #[test]
    fn reader_empty() {
        let mut reader = super::Reader::new(string_reader("\n  \n"));
        assert!(reader.read_tree().unwrap().is_none());
    }

    #[test]
    #[should_panic(expected = "UnterminatedTree")]
    fn reader_rejects_unterminated_tree() {
        let mut reader = super::Reader::new(string_reader("(S (NN Haus)\n"));
        reader.read_tree().unwrap();
    }

    #[test]
    #[should_panic(expected = "UnexpectedClosingBracket")]
    fn reader_rejects_unbalanced_brackets() {
        let mut reader = super::Reader::new(string_reader("(NN Haus))\n"));
        assert!(reader.read_tree().is_ok());
        reader.read_tree().unwrap();
    }

    #[test]
    #[should_panic(expected = "TokenOutsideTree")]
    fn reader_rejects_plain_tokens() {
        let mut reader = super::Reader::new(string_reader("Er schläft .\n"));
        reader.read_tree().unwrap();
    }

    #[test]
    fn reader_resumes_after_error() {
        let mut reader = super::Reader::new(string_reader("Er schläft .\n(NN Haus)\n"));
        assert!(reader.read_tree().is_err());
        assert_eq!(
            reader.read_tree().unwrap(),
            Some(Node::preterminal("NN", "Haus"))
        );
    }

    #[test]
    fn reader_skips_stray_closing_bracket() {
        let mut reader = super::Reader::new(string_reader("(NN a)) (NN b)\n(NN c)\n"));
        assert_eq!(
            reader.read_tree().unwrap(),
            Some(Node::preterminal("NN", "a"))
        );
        assert_eq!(
            reader.read_tree().unwrap_err().to_string(),
            "closing bracket without opening bracket in: \")\""
        );
        assert_eq!(
            reader.read_tree().unwrap(),
            Some(Node::preterminal("NN", "b"))
        );
        assert_eq!(
            reader.read_tree().unwrap(),
            Some(Node::preterminal("NN", "c"))
        );
        assert!(reader.read_tree().unwrap().is_none());
    }

    #[test]
    fn reader_skips_stray_tokens_on_line() {
        let mut reader = super::Reader::new(string_reader("Er schläft . (NN Haus)\n"));
        assert_eq!(
            reader.read_tree().unwrap_err().to_string(),
            "token outside of a tree: \"Er schläft .\""
        );
        assert_eq!(
            reader.read_tree().unwrap(),
            Some(Node::preterminal("NN", "Haus"))
        );
    }

    #[test]
    fn tokenizer_bracket_in_atom() {
        let tokens: Vec<_> = Tokens::new("($( -)(NN x)").map(|(_, token)| token).collect();
        assert_eq!(
            tokens,
            [
                Token::Open,
                Token::Atom("$("),
                Token::Atom("-"),
                Token::Close,
                Token::Open,
                Token::Atom("NN"),
                Token::Atom("x"),
                Token::Close,
            ]
        );
    }

    #[test]
    fn parse_bracket_tag() {
        let tree = parse_tree("(ROOT (S (PPER Er) ($( -) (VVFIN lacht)))").unwrap();
        assert_eq!(tree.children()[0].children()[1], Node::preterminal("$(", "-"));
        assert_eq!(tree.sentence(), "Er - lacht ");
    }

    #[test]
    fn reader_bracket_tag() {
        let mut reader = super::Reader::new(string_reader(
            "(ROOT (S (PPER Er) ($( -) (VVFIN lacht)))\n(ROOT (S (PPER Sie) (VVFIN lacht)))\n",
        ));

        let first = reader.read_tree().unwrap().unwrap();
        assert_eq!(first.sentence(), "Er - lacht ");

        let second = reader.read_tree().unwrap().unwrap();
        assert_eq!(second.sentence(), "Sie lacht ");

        assert!(reader.read_tree().unwrap().is_none());
    }

    #[test]
    fn tree_writer_bracket_tag() {
        let tree = parse_tree("(S ($( \") (NN Haus) ($( \"))").unwrap();
        let mut writer = TreeWriter::new(Vec::new());
        writer.write_tree(&tree).unwrap();

        let written = str::from_utf8(writer.get_ref()).unwrap();
        assert_eq!(written, "(S ($( \") (NN Haus) ($( \"))\n");
        assert_eq!(parse_tree(written.trim()).unwrap(), tree);
    }

    #[test]
    fn parse_unlabeled_root() {
        let tree = parse_tree("( (S (PPER Er) (VVFIN schläft)) )").unwrap();
        assert_eq!(tree.label(), "");
        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.children()[0].label(), "S");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_tree("  "), Err(ParseError::MissingTree));
        assert_eq!(
            parse_tree("(S (NN Haus) ())"),
            Err(ParseError::EmptyBracket {
                value: "()".to_owned()
            })
        );
        assert_eq!(
            parse_tree("(NN Haus) (NN Baum)"),
            Err(ParseError::TrailingContent {
                value: "(NN Baum)".to_owned()
            })
        );
        assert_eq!(
            parse_tree("Haus"),
            Err(ParseError::TokenOutsideTree {
                value: "Haus".to_owned()
            })
        );
        assert_eq!(
            parse_tree("(S (NN Haus)"),
            Err(ParseError::UnterminatedTree {
                value: "(S (NN Haus)".to_owned()
            })
        );
    }

    #[test]
    fn sentence_writer() {
        let mut writer = SentenceWriter::new(Vec::new());

        for tree in &*TEST_TREES {
            writer.write_tree(tree).unwrap();
        }

        assert_eq!(
            read_file(SENTENCES).unwrap(),
            str::from_utf8(writer.get_ref()).unwrap()
        );
    }

    #[test]
    fn tree_writer() {
        let mut writer = TreeWriter::new(Vec::new());

        for tree in &*TEST_TREES {
            writer.write_tree(tree).unwrap();
        }

        assert_eq!(
            read_file(BASIC).unwrap(),
            str::from_utf8(writer.get_ref()).unwrap()
        );
    }

    #[test]
    fn tree_writer_round_trip() {
        let data = read_file(MULTILINE).unwrap();
        let mut writer = TreeWriter::new(Vec::new());
        for tree in super::Reader::new(string_reader(&data)) {
            writer.write_tree(&tree.unwrap()).unwrap();
        }

        let written = String::from_utf8(writer.into_inner()).unwrap();
        let reread: Vec<_> = super::Reader::new(string_reader(&written))
            .trees()
            .map(Result::unwrap)
            .collect();
        assert_eq!(&*TEST_TREES, &reread);
    }
}
