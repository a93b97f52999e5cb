//! The opening-book oracle. The default implementation never suggests a
//! move, so the engine always falls through to the search kernel; a real
//! book can be plugged in without the search code knowing the difference.

use crate::board::Move;
use crate::search::context::SearchContext;

pub trait OpeningBook: Send + Sync {
    /// Returns a book move for the current position, or `None` to defer to
    /// the search kernel.
    fn book_move(&self, ctx: &SearchContext) -> Option<Move>;
}

#[derive(Default)]
pub struct NullBook;

impl OpeningBook for NullBook {
    fn book_move(&self, _ctx: &SearchContext) -> Option<Move> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn null_book_never_suggests_a_move() {
        let book = NullBook;
        let ctx = SearchContext::new(Board::new());
        assert!(book.book_move(&ctx).is_none());
    }
}
