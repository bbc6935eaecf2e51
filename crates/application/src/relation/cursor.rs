use super::Value;

/// Positional access to the columns of a produced row.
pub trait Row {
    fn column(&self, index: usize) -> Value;
}

/// Forward-only cursor over a fully materialized row set.
///
/// End of data holds exactly when the position equals the row count.
#[derive(Debug, Clone)]
pub struct RowCursor<R> {
    rows: Vec<R>,
    pos: usize,
}

impl<R> RowCursor<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows, pos: 0 }
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.rows.len()
    }

    pub fn current(&self) -> Option<&R> {
        self.rows.get(self.pos)
    }

    pub fn advance(&mut self) {
        if !self.eof() {
            self.pos += 1;
        }
    }

    pub fn rowid(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Row> RowCursor<R> {
    pub fn column(&self, index: usize) -> Option<Value> {
        self.current().map(|row| row.column(index))
    }
}

impl<R: Clone> Iterator for RowCursor<R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let row = self.current().cloned()?;
        self.pos += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_after_every_row_visited() {
        let mut cursor = RowCursor::new(vec![1, 2, 3]);
        let mut seen = Vec::new();
        while !cursor.eof() {
            seen.push(*cursor.current().unwrap());
            cursor.advance();
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(cursor.rowid(), 3);
        cursor.advance();
        assert_eq!(cursor.rowid(), 3);
    }

    #[test]
    fn test_empty_cursor_is_eof() {
        let cursor: RowCursor<u8> = RowCursor::new(vec![]);
        assert!(cursor.eof());
        assert!(cursor.current().is_none());
    }

    #[test]
    fn test_iterator_consumes_forward() {
        let mut cursor = RowCursor::new(vec!["a", "b"]);
        assert_eq!(cursor.next(), Some("a"));
        assert_eq!(cursor.size_hint(), (1, Some(1)));
        assert_eq!(cursor.collect::<Vec<_>>(), vec!["b"]);
    }
}
