//! Reducer composition utilities
//!
//! Components are small and nest: an order card embeds a confirmation
//! dialog, the events layout embeds the sidebar. [`scope`] embeds a child
//! reducer into a parent's state, action and environment.
//!
//! # Examples
//!
//! ```
//! use campus_ui_core::composition::scope;
//! use campus_ui_core::{Effect, Reducer, SmallVec, smallvec};
//!
//! #[derive(Default)]
//! struct DialogState {
//!     open: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum DialogAction {
//!     Open,
//! }
//!
//! struct DialogReducer;
//!
//! impl Reducer for DialogReducer {
//!     type State = DialogState;
//!     type Action = DialogAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut DialogState, _action: DialogAction, _env: &()) -> SmallVec<[Effect<DialogAction>; 4]> {
//!         state.open = true;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Default)]
//! struct PageState {
//!     dialog: DialogState,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum PageAction {
//!     Dialog(DialogAction),
//! }
//!
//! fn dialog_state(page: &mut PageState) -> &mut DialogState {
//!     &mut page.dialog
//! }
//!
//! fn unit(_: &()) -> &() {
//!     &()
//! }
//!
//! let dialog = scope(
//!     DialogReducer,
//!     dialog_state,
//!     |action: PageAction| match action {
//!         PageAction::Dialog(action) => Some(action),
//!     },
//!     PageAction::Dialog,
//!     unit,
//! );
//!
//! let mut page = PageState::default();
//! let _ = dialog.reduce(&mut page, PageAction::Dialog(DialogAction::Open), &());
//! assert!(page.dialog.open);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Embeds a child reducer into a parent component.
///
/// - `state` focuses the parent state on the child's state
/// - `extract` picks the child action out of a parent action (other actions are ignored)
/// - `embed` wraps child actions produced by effects back into parent actions
/// - `environment` focuses the parent environment on the child's environment
pub fn scope<PS, PA, PE, R>(
    reducer: R,
    state: fn(&mut PS) -> &mut R::State,
    extract: fn(PA) -> Option<R::Action>,
    embed: fn(R::Action) -> PA,
    environment: fn(&PE) -> &R::Environment,
) -> ScopedReducer<PS, PA, PE, R>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        state,
        extract,
        embed,
        environment,
    }
}

/// A child reducer embedded into a parent component.
///
/// Created by [`scope`].
pub struct ScopedReducer<PS, PA, PE, R>
where
    R: Reducer,
{
    reducer: R,
    state: fn(&mut PS) -> &mut R::State,
    extract: fn(PA) -> Option<R::Action>,
    embed: fn(R::Action) -> PA,
    environment: fn(&PE) -> &R::Environment,
}

impl<PS, PA, PE, R> Reducer for ScopedReducer<PS, PA, PE, R>
where
    R: Reducer,
    R::Action: Send + 'static,
    PA: Send + 'static,
{
    type State = PS;
    type Action = PA;
    type Environment = PE;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.state)(state);
        let child_env = (self.environment)(env);

        self.reducer
            .reduce(child_state, child_action, child_env)
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}
