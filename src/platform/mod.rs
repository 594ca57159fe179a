//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Run seeds (wall clock)
//! - Pointer coordinates
//! - Drawing to an HTML canvas (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

use glam::Vec2;

/// Seed for a new run, taken from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a new run, taken from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Convert a client-space pointer position into canvas space
#[inline]
pub fn client_to_canvas(client: Vec2, canvas_origin: Vec2) -> Vec2 {
    client - canvas_origin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_canvas() {
        assert_eq!(
            client_to_canvas(Vec2::new(150.0, 90.0), Vec2::new(50.0, 40.0)),
            Vec2::new(100.0, 50.0)
        );
    }

    #[test]
    fn test_time_seed_varies_with_clock() {
        assert!(time_seed() > 0);
    }
}
