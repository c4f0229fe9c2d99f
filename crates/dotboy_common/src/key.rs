/// Host key codes forwarded to machines.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    A,
    S,
    X,
    Z,
    Enter,
    Space,
    Escape,
}
