/// The scrollable viewport the engines drive.
///
/// Implemented by the adapter's viewport (see `dragswipe-adapter`), or by a UI toolkit's own
/// scroll state. All deltas are in pixels along the main axis, in layout order: positive values
/// reveal content further down the list (for reversed layouts, further up on screen).
pub trait ScrollController {
    /// Scrolls immediately by `delta` and returns how much was actually consumed (less than
    /// `delta` at either scroll boundary).
    fn scroll_by(&mut self, delta: f32) -> f32;

    /// Starts an animated scroll by `delta`.
    fn animate_scroll_by(&mut self, delta: f32, now_ms: u64);

    /// Positions the item at `index` exactly `scroll_offset` pixels past the viewport start.
    fn request_scroll_to_item(&mut self, index: usize, scroll_offset: f32);

    /// Starts an animated scroll that brings the item at `index` into view.
    fn animate_scroll_to_item(&mut self, index: usize, now_ms: u64);
}
