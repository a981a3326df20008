use async_trait::async_trait;
use seqfold_core::selector::{BranchMap, Condition, branch_multiple, branch2};
use seqfold_core::{bus::Bus, outcome::Outcome, step::Step, transition::Transition};
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

/// Faults with `reject(&value)` unless the predicate accepts the value.
pub struct GuardNode<T, P, R> {
    pub predicate: Arc<P>,
    pub reject: Arc<R>,
    pub _marker: PhantomData<fn(T) -> T>,
}

impl<T, P, R> GuardNode<T, P, R> {
    pub fn new<E>(predicate: P, reject: R) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        R: Fn(&T) -> E + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            reject: Arc::new(reject),
            _marker: PhantomData,
        }
    }
}

impl<T, P, R> Clone for GuardNode<T, P, R> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            reject: self.reject.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, P, R> std::fmt::Debug for GuardNode<T, P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardNode").finish()
    }
}

#[async_trait]
impl<T, E, P, R> Step<T, E> for GuardNode<T, P, R>
where
    T: Send + 'static,
    E: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
    R: Fn(&T) -> E + Send + Sync + 'static,
{
    async fn run(&self, input: T, _bus: &mut Bus) -> anyhow::Result<Outcome<T, E>> {
        if (self.predicate)(&input) {
            Ok(Outcome::next(input))
        } else {
            Ok(Outcome::fault((self.reject)(&input)))
        }
    }
}

/// Runs one of two transitions depending on a predicate over the value.
pub struct BranchNode<T, P> {
    pub predicate: P,
    pub on_true: Arc<dyn Transition<T>>,
    pub on_false: Arc<dyn Transition<T>>,
}

impl<T, P> BranchNode<T, P>
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    pub fn new(
        predicate: P,
        on_true: impl Transition<T> + 'static,
        on_false: impl Transition<T> + 'static,
    ) -> Self {
        Self {
            predicate,
            on_true: Arc::new(on_true),
            on_false: Arc::new(on_false),
        }
    }
}

#[async_trait]
impl<T, P> Transition<T> for BranchNode<T, P>
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    async fn run(&self, input: T, bus: &mut Bus) -> anyhow::Result<T> {
        let chosen = branch2(
            Condition::deferred(|| (self.predicate)(&input)),
            &self.on_true,
            &self.on_false,
        )
        .clone();
        tracing::trace!(branch = %chosen.label(), "BranchNode selected");
        chosen.run(input, bus).await
    }
}

/// Runs the transition registered under the key the matcher derives from the value.
///
/// An unmatched key without a default is a step failure.
pub struct SwitchNode<K, T, M> {
    pub matcher: M,
    pub branches: BranchMap<K, Arc<dyn Transition<T>>>,
}

impl<K, T, M> SwitchNode<K, T, M>
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    T: Send + 'static,
    M: Fn(&T) -> K + Send + Sync + 'static,
{
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            branches: BranchMap::new(),
        }
    }

    pub fn branch(mut self, key: K, transition: impl Transition<T> + 'static) -> Self {
        self.branches = self.branches.branch(key, Arc::new(transition));
        self
    }

    pub fn otherwise(mut self, transition: impl Transition<T> + 'static) -> Self {
        self.branches = self.branches.with_default(Arc::new(transition));
        self
    }
}

#[async_trait]
impl<K, T, M> Transition<T> for SwitchNode<K, T, M>
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    T: Send + 'static,
    M: Fn(&T) -> K + Send + Sync + 'static,
{
    async fn run(&self, input: T, bus: &mut Bus) -> anyhow::Result<T> {
        let chosen = branch_multiple(|| (self.matcher)(&input), &self.branches)?.clone();
        tracing::trace!(branch = %chosen.label(), "SwitchNode selected");
        chosen.run(input, bus).await
    }
}
