//! Mapping from byte offsets in the original input to line/column
//! positions for diagnostics.
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub(crate) struct Source<'s> {
    body: &'s str,
}

impl<'s> Source<'s> {
    pub(crate) fn new(body: &'s str) -> Source<'s> {
        Source { body }
    }

    pub(crate) fn location_of(&self, pos: usize) -> LineAndColumn {
        const START_COL: u32 = 1;
        const START_LINE: u32 = 1;

        let mut line = START_LINE;
        let mut column = START_COL;
        for (i, ch) in self.body.char_indices() {
            if i >= pos {
                break;
            }
            match ch {
                '\n' => {
                    column = START_COL;
                    line += 1;
                }
                _ => {
                    column += 1;
                }
            }
        }
        LineAndColumn { line, column }
    }
}

/// A position in the source text.  Both line and column are counted
/// from 1, which is how editors and compilers conventionally report
/// positions to users.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub(crate) struct LineAndColumn {
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl LineAndColumn {
    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn column(&self) -> u32 {
        self.column
    }
}

impl Display for LineAndColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[test]
fn test_location_of() {
    let src = Source::new("ab\ncd\n");
    assert_eq!(src.location_of(0), LineAndColumn { line: 1, column: 1 });
    assert_eq!(src.location_of(1), LineAndColumn { line: 1, column: 2 });
    assert_eq!(src.location_of(3), LineAndColumn { line: 2, column: 1 });
    assert_eq!(src.location_of(4), LineAndColumn { line: 2, column: 2 });
}

#[test]
fn test_location_of_past_end() {
    let src = Source::new("x");
    assert_eq!(src.location_of(10), LineAndColumn { line: 1, column: 2 });
}
