use earworm_core::RawKey;
use rdev::Key;

/// Relabel an rdev key as a [`RawKey`].
///
/// One to one: sides and encodings are kept as delivered and collapsed
/// later by `normalize`. Keys rdev cannot name arrive as `Code`.
pub(crate) fn to_raw_key(key: Key) -> RawKey {
    match key {
        Key::Alt => RawKey::AltLeft,
        Key::AltGr => RawKey::AltGr,
        Key::ControlLeft => RawKey::ControlLeft,
        Key::ControlRight => RawKey::ControlRight,
        Key::ShiftLeft => RawKey::ShiftLeft,
        Key::ShiftRight => RawKey::ShiftRight,
        Key::MetaLeft => RawKey::MetaLeft,
        Key::MetaRight => RawKey::MetaRight,
        Key::Function => RawKey::Function,

        Key::Escape => RawKey::Escape,
        Key::Space => RawKey::Space,
        Key::Return => RawKey::Return,
        Key::Tab => RawKey::Tab,
        Key::Backspace => RawKey::Backspace,
        Key::Delete => RawKey::Delete,
        Key::Insert => RawKey::Insert,
        Key::Home => RawKey::Home,
        Key::End => RawKey::End,
        Key::PageUp => RawKey::PageUp,
        Key::PageDown => RawKey::PageDown,
        Key::UpArrow => RawKey::UpArrow,
        Key::DownArrow => RawKey::DownArrow,
        Key::LeftArrow => RawKey::LeftArrow,
        Key::RightArrow => RawKey::RightArrow,
        Key::CapsLock => RawKey::CapsLock,
        Key::PrintScreen => RawKey::PrintScreen,
        Key::ScrollLock => RawKey::ScrollLock,
        Key::Pause => RawKey::Pause,
        Key::NumLock => RawKey::NumLock,
        Key::IntlBackslash => RawKey::IntlBackslash,

        Key::F1 => RawKey::F(1),
        Key::F2 => RawKey::F(2),
        Key::F3 => RawKey::F(3),
        Key::F4 => RawKey::F(4),
        Key::F5 => RawKey::F(5),
        Key::F6 => RawKey::F(6),
        Key::F7 => RawKey::F(7),
        Key::F8 => RawKey::F(8),
        Key::F9 => RawKey::F(9),
        Key::F10 => RawKey::F(10),
        Key::F11 => RawKey::F(11),
        Key::F12 => RawKey::F(12),

        Key::Num0 => RawKey::Char('0'),
        Key::Num1 => RawKey::Char('1'),
        Key::Num2 => RawKey::Char('2'),
        Key::Num3 => RawKey::Char('3'),
        Key::Num4 => RawKey::Char('4'),
        Key::Num5 => RawKey::Char('5'),
        Key::Num6 => RawKey::Char('6'),
        Key::Num7 => RawKey::Char('7'),
        Key::Num8 => RawKey::Char('8'),
        Key::Num9 => RawKey::Char('9'),

        Key::KeyA => RawKey::Char('a'),
        Key::KeyB => RawKey::Char('b'),
        Key::KeyC => RawKey::Char('c'),
        Key::KeyD => RawKey::Char('d'),
        Key::KeyE => RawKey::Char('e'),
        Key::KeyF => RawKey::Char('f'),
        Key::KeyG => RawKey::Char('g'),
        Key::KeyH => RawKey::Char('h'),
        Key::KeyI => RawKey::Char('i'),
        Key::KeyJ => RawKey::Char('j'),
        Key::KeyK => RawKey::Char('k'),
        Key::KeyL => RawKey::Char('l'),
        Key::KeyM => RawKey::Char('m'),
        Key::KeyN => RawKey::Char('n'),
        Key::KeyO => RawKey::Char('o'),
        Key::KeyP => RawKey::Char('p'),
        Key::KeyQ => RawKey::Char('q'),
        Key::KeyR => RawKey::Char('r'),
        Key::KeyS => RawKey::Char('s'),
        Key::KeyT => RawKey::Char('t'),
        Key::KeyU => RawKey::Char('u'),
        Key::KeyV => RawKey::Char('v'),
        Key::KeyW => RawKey::Char('w'),
        Key::KeyX => RawKey::Char('x'),
        Key::KeyY => RawKey::Char('y'),
        Key::KeyZ => RawKey::Char('z'),

        Key::BackQuote => RawKey::Char('`'),
        Key::Minus => RawKey::Char('-'),
        Key::Equal => RawKey::Char('='),
        Key::LeftBracket => RawKey::Char('['),
        Key::RightBracket => RawKey::Char(']'),
        Key::SemiColon => RawKey::Char(';'),
        Key::Quote => RawKey::Char('\''),
        Key::BackSlash => RawKey::Char('\\'),
        Key::Comma => RawKey::Char(','),
        Key::Dot => RawKey::Char('.'),
        Key::Slash => RawKey::Char('/'),

        Key::Kp0 => RawKey::Keypad('0'),
        Key::Kp1 => RawKey::Keypad('1'),
        Key::Kp2 => RawKey::Keypad('2'),
        Key::Kp3 => RawKey::Keypad('3'),
        Key::Kp4 => RawKey::Keypad('4'),
        Key::Kp5 => RawKey::Keypad('5'),
        Key::Kp6 => RawKey::Keypad('6'),
        Key::Kp7 => RawKey::Keypad('7'),
        Key::Kp8 => RawKey::Keypad('8'),
        Key::Kp9 => RawKey::Keypad('9'),
        Key::KpMinus => RawKey::Keypad('-'),
        Key::KpPlus => RawKey::Keypad('+'),
        Key::KpMultiply => RawKey::Keypad('*'),
        Key::KpDivide => RawKey::Keypad('/'),
        Key::KpReturn => RawKey::KeypadEnter,
        Key::KpDelete => RawKey::KeypadDelete,

        Key::Unknown(code) => RawKey::Code(code),
    }
}
