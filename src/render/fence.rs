/// Tracks fenced code blocks (``` or ~~~) while scanning a document line by line.
#[derive(Debug, Default)]
pub(crate) struct Fence {
    open: Option<(char, usize)>,
}

impl Fence {
    /// Feed the next line; returns true if the line belongs to a code block,
    /// including the opening and closing fence lines.
    pub(crate) fn feed(&mut self, line: &str) -> bool {
        let marker = Self::marker(line);

        match (self.open, marker) {
            (None, Some(m)) => {
                self.open = Some(m);
                true
            }
            (None, None) => false,
            (Some((c, n)), Some((mc, mn))) if c == mc && mn >= n && Self::is_bare(line, mc) => {
                self.open = None;
                true
            }
            (Some(_), _) => true,
        }
    }

    /// The fence character and run length, if the line opens or closes a fence.
    fn marker(line: &str) -> Option<(char, usize)> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }

        let rest = &line[indent..];
        let c = rest.chars().next()?;
        if c != '`' && c != '~' {
            return None;
        }

        let n = rest.chars().take_while(|x| *x == c).count();
        if n < 3 {
            return None;
        }

        // A backtick run followed by another backtick on the line is a code span.
        if c == '`' && rest[n..].contains('`') {
            return None;
        }

        Some((c, n))
    }

    /// A closing fence carries no info string.
    fn is_bare(line: &str, c: char) -> bool {
        line.trim().trim_start_matches(c).is_empty()
    }
}
