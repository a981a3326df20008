use async_trait::async_trait;
use seqfold_core::{bus::Bus, transition::Transition};
use std::marker::PhantomData;
use std::time::Duration;

/// Waits before passing the value on, standing in for a slow collaborator
/// such as a database write.
#[derive(Debug, Clone)]
pub struct DelayNode<T> {
    latency: Duration,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> DelayNode<T> {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            _marker: PhantomData,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl<T> Transition<T> for DelayNode<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T, _bus: &mut Bus) -> anyhow::Result<T> {
        if !self.latency.is_zero() {
            tracing::trace!(latency = ?self.latency, "Delaying");
            tokio::time::sleep(self.latency).await;
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqfold_core::stop::StopCondition;
    use seqfold_runtime::reduce_async;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delays_add_up_in_sequence() {
        let steps: Vec<Box<dyn Transition<&'static str>>> = vec![
            Box::new(DelayNode::from_millis(400)),
            Box::new(DelayNode::new(Duration::from_millis(600))),
        ];

        let start = Instant::now();
        let out = reduce_async("ping", &steps, &StopCondition::never(), &mut Bus::new())
            .await
            .unwrap();

        assert_eq!(out, "ping");
        assert!(start.elapsed() >= Duration::from_millis(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_latency_does_not_sleep() {
        let node = DelayNode::<u8>::from_millis(0);
        let start = Instant::now();
        assert_eq!(node.run(3, &mut Bus::new()).await.unwrap(), 3);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
