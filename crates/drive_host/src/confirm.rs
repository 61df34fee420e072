//! Confirmation prompt contracts.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ConfirmService`].
pub type ConfirmFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that asks the user to confirm a destructive action.
pub trait ConfirmService {
    /// Shows `message` and resolves to `true` when the user accepts.
    fn confirm<'a>(&'a self, message: &'a str) -> ConfirmFuture<'a, bool>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Confirmation adapter for hosts without a prompt. Always declines.
pub struct NoopConfirmService;

impl ConfirmService for NoopConfirmService {
    fn confirm<'a>(&'a self, _message: &'a str) -> ConfirmFuture<'a, bool> {
        Box::pin(async { false })
    }
}

#[derive(Debug, Clone, Default)]
/// Confirmation adapter that replays queued answers and records each prompt.
///
/// Once the queue is empty every further prompt is declined.
pub struct ScriptedConfirmService {
    answers: Rc<RefCell<VecDeque<bool>>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedConfirmService {
    /// Creates a service that answers prompts with `answers`, in order.
    pub fn with_answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Rc::new(RefCell::new(answers.into_iter().collect())),
            prompts: Rc::default(),
        }
    }

    /// Returns every prompt shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl ConfirmService for ScriptedConfirmService {
    fn confirm<'a>(&'a self, message: &'a str) -> ConfirmFuture<'a, bool> {
        Box::pin(async move {
            self.prompts.borrow_mut().push(message.to_string());
            self.answers.borrow_mut().pop_front().unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn scripted_confirm_replays_answers_then_declines() {
        let confirm = ScriptedConfirmService::with_answers([true, false]);
        let obj: &dyn ConfirmService = &confirm;

        assert!(block_on(obj.confirm("first?")));
        assert!(!block_on(obj.confirm("second?")));
        assert!(!block_on(obj.confirm("third?")));
        assert_eq!(confirm.prompts(), vec!["first?", "second?", "third?"]);
        assert!(!block_on(NoopConfirmService.confirm("anything?")));
    }
}
