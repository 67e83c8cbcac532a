//! Host-neutral input events and their mapping onto queued operations
use crate::animator::{OperationKind, OperationRequest};
use crate::config::SceneConfig;

/// A key press, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Events that hosts enqueue for the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Wheel movement in notches; positive grows the scene
    Wheel(f64),
}

/// What a key press asks the scene to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Operation(OperationRequest),
    ZoomIn,
    ZoomOut,
}

/// Map a key to its action. Unbound keys map to `None`.
///
/// Rotation follows the numeric keypad: arrows, `w`/`a`/`s`/`d` and
/// `8`/`4`/`2`/`6` turn about one axis, while the corner keys (PageUp/`9`,
/// PageDown/`3`, Home/`7`, End/`1`) turn about X and Y at once. `e`/`r` roll
/// about Z, `i`/`j`/`k`/`l`/`u`/`o` translate and `+`/`-` zoom.
pub fn map_key(key: Key, config: &SceneConfig) -> Option<KeyAction> {
    let r = config.rotate_degrees;
    let t = config.translate_units;
    let rotate = |x, y, z| Some((OperationKind::Rotate, x, y, z));
    let translate = |x, y, z| Some((OperationKind::Translate, x, y, z));

    let (kind, x, y, z) = match key {
        Key::Up => rotate(-r, 0.0, 0.0),
        Key::Down => rotate(r, 0.0, 0.0),
        Key::Left => rotate(0.0, -r, 0.0),
        Key::Right => rotate(0.0, r, 0.0),
        Key::PageUp => rotate(-r, r, 0.0),
        Key::PageDown => rotate(r, r, 0.0),
        Key::Home => rotate(-r, -r, 0.0),
        Key::End => rotate(r, -r, 0.0),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'w' | '8' => return map_key(Key::Up, config),
            's' | '2' => return map_key(Key::Down, config),
            'a' | '4' => return map_key(Key::Left, config),
            'd' | '6' => return map_key(Key::Right, config),
            '9' => return map_key(Key::PageUp, config),
            '3' => return map_key(Key::PageDown, config),
            '7' => return map_key(Key::Home, config),
            '1' => return map_key(Key::End, config),
            'e' => rotate(0.0, 0.0, r),
            'r' => rotate(0.0, 0.0, -r),
            'j' => translate(-t, 0.0, 0.0),
            'l' => translate(t, 0.0, 0.0),
            'i' => translate(0.0, t, 0.0),
            'k' => translate(0.0, -t, 0.0),
            'u' => translate(0.0, 0.0, -t),
            'o' => translate(0.0, 0.0, t),
            '+' | '=' => return Some(KeyAction::ZoomIn),
            '-' | '_' => return Some(KeyAction::ZoomOut),
            _ => None,
        },
    }?;

    Some(KeyAction::Operation(OperationRequest::new(
        kind,
        config.total_frames,
        config.part_count,
        x,
        y,
        z,
    )))
}

/// Uniform scale factor for a wheel movement
pub fn wheel_scale_factor(delta: f64) -> f64 {
    1.0 + delta / 5.0
}

pub fn wheel_request(delta: f64, config: &SceneConfig) -> OperationRequest {
    let factor = wheel_scale_factor(delta);
    OperationRequest::new(
        OperationKind::Scale,
        config.total_frames,
        config.part_count,
        factor,
        factor,
        factor,
    )
}

/// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl HitRegion {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_delta_five_doubles() {
        assert_eq!(wheel_scale_factor(5.0), 2.0);
        let request = wheel_request(5.0, &SceneConfig::default());
        assert_eq!(request.kind, OperationKind::Scale);
        assert_eq!((request.x, request.y, request.z), (2.0, 2.0, 2.0));
    }

    #[test]
    fn test_arrow_keys_rotate_one_axis() {
        let config = SceneConfig::default();
        match map_key(Key::Right, &config) {
            Some(KeyAction::Operation(request)) => {
                assert_eq!(request.kind, OperationKind::Rotate);
                assert_eq!((request.x, request.y, request.z), (0.0, 15.0, 0.0));
                assert_eq!((request.total_frames, request.part_count), (50, 12));
            }
            other => panic!("unexpected mapping {other:?}"),
        }
    }

    fn amounts(key: Key) -> (f64, f64, f64) {
        match map_key(key, &SceneConfig::default()) {
            Some(KeyAction::Operation(request)) => (request.x, request.y, request.z),
            other => panic!("{key:?} mapped to {other:?}"),
        }
    }

    #[test]
    fn test_letter_and_keypad_aliases() {
        for (alias, key) in [
            ('w', Key::Up),
            ('8', Key::Up),
            ('S', Key::Down),
            ('2', Key::Down),
            ('a', Key::Left),
            ('4', Key::Left),
            ('d', Key::Right),
            ('6', Key::Right),
            ('9', Key::PageUp),
            ('3', Key::PageDown),
            ('7', Key::Home),
            ('1', Key::End),
        ] {
            assert_eq!(amounts(Key::Char(alias)), amounts(key), "alias {alias}");
        }
    }

    #[test]
    fn test_corner_keys_rotate_two_axes() {
        assert_eq!(amounts(Key::PageUp), (-15.0, 15.0, 0.0));
        assert_eq!(amounts(Key::PageDown), (15.0, 15.0, 0.0));
        assert_eq!(amounts(Key::Home), (-15.0, -15.0, 0.0));
        assert_eq!(amounts(Key::End), (15.0, -15.0, 0.0));
    }

    #[test]
    fn test_translation_keys() {
        let config = SceneConfig::default();
        let Some(KeyAction::Operation(up)) = map_key(Key::Char('i'), &config) else {
            panic!("i should translate");
        };
        assert_eq!(up.kind, OperationKind::Translate);
        assert_eq!((up.x, up.y, up.z), (0.0, 1.0, 0.0));
    }

    #[test]
    fn test_zoom_and_unbound_keys() {
        let config = SceneConfig::default();
        assert_eq!(map_key(Key::Char('+'), &config), Some(KeyAction::ZoomIn));
        assert_eq!(map_key(Key::Char('-'), &config), Some(KeyAction::ZoomOut));
        assert_eq!(map_key(Key::Char('z'), &config), None);
    }

    #[test]
    fn test_hit_region() {
        let region = HitRegion {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 15.0,
        };
        assert!(region.contains(10.0, 20.0));
        assert!(region.contains(60.0, 30.0));
        assert!(!region.contains(9.0, 30.0));
        assert!(!region.contains(60.0, 36.0));
    }
}
