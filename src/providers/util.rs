use anyhow::Error;
use std::future::Future;
use tracing::{debug, warn};

/// Tries each provider in order and returns the first successful result
/// together with the provider that produced it.
///
/// Every provider is attempted at most once; there is no delay between
/// attempts. `None` means the whole chain was exhausted.
pub async fn first_available<'a, P, T, F, Fut>(
    providers: &'a [P],
    mut operation: F,
) -> Option<(&'a P, T)>
where
    F: FnMut(&'a P) -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let total = providers.len();
    for (attempt, provider) in providers.iter().enumerate() {
        match operation(provider).await {
            Ok(val) => {
                debug!("Provider {}/{} succeeded", attempt + 1, total);
                return Some((provider, val));
            }
            Err(err) => {
                warn!("Provider {}/{} failed: {:#}", attempt + 1, total, err);
            }
        }
    }
    None
}
