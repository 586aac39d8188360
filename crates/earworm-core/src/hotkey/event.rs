/// Edge event produced by the [`HotkeyMatcher`](crate::HotkeyMatcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent<A> {
    /// The combo bound to this action just became fully held.
    Fired(A),
    /// The combo bound to this action was fully held and no longer is.
    Released(A),
}

impl<A: Copy> HotkeyEvent<A> {
    /// The action this event refers to.
    pub fn action(&self) -> A {
        match self {
            HotkeyEvent::Fired(action) | HotkeyEvent::Released(action) => *action,
        }
    }
}
