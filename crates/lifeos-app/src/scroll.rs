//! Scroll position helpers for transcript views.

/// Default distance past which a view counts as scrolled away.
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 200;

/// True when more than `threshold` units of content lie below the visible
/// window. A view in that state should not be yanked to the newest message.
pub fn is_far_from_bottom(
    scroll_top: u32,
    scroll_height: u32,
    client_height: u32,
    threshold: u32,
) -> bool {
    scroll_height
        .saturating_sub(scroll_top)
        .saturating_sub(client_height)
        > threshold
}
