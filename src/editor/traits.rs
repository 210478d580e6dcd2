/// Pan/zoom state owned by the rendering layer.
///
/// The editor never inspects the transform; it only decides *when* it should be reset
/// (see [`EditController::reset_view`](super::EditController::reset_view)).
pub trait ViewTransform {
    /// Return to the default view (fit all points).
    fn reset(&mut self);
}
