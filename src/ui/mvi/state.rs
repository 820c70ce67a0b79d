/// Marker trait for view state.
///
/// `Default` is the state before anything has started; `PartialEq` lets
/// controllers detect transitions.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
