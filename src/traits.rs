/// Bounds every sampled value type must meet: trials are drawn from
/// `Arc`-shared closures and, with the `parallel` feature, on rayon workers.
pub trait Shareable: Clone + Send + Sync + 'static {}

impl<T> Shareable for T where T: Clone + Send + Sync + 'static {}
