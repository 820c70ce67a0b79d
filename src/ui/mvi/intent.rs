/// Marker trait for intents.
///
/// Intents carry everything the reducer needs, including the time they
/// were observed, so that reducing stays deterministic.
pub trait Intent: Send + 'static {}
