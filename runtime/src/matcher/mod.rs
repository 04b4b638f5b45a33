/// An evaluator that is fed its input one item at a time.
pub trait PatternEvaluatorMut: Sized {
    /// The input interable type to be compared.
    type Item;

    fn initial_state(mut self) -> Self {
        self.initial_state_mut();
        self
    }

    /// Defines the evaluator as being in the initial state, discarding any
    /// input consumed so far.
    fn initial_state_mut(&mut self);

    /// Returns a boolean signifying if the match is in a final state.
    fn is_in_accept_state(&self) -> bool;

    /// Attempts to advance to the next state, returning an [Option] signifying
    /// the success of that advance.
    fn advance_mut<'a>(&mut self, next: &'a Self::Item) -> Option<&'a Self::Item>;

    /// Feeds every item of `iter` to the evaluator, returning whether it is
    /// in a final state once the input is exhausted.
    fn matches<I>(&mut self, iter: I) -> bool
    where
        I: Iterator<Item = Self::Item>,
    {
        iter.fold(self.is_in_accept_state(), |_, item| {
            self.advance_mut(&item);

            self.is_in_accept_state()
        })
    }
}
