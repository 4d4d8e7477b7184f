//! Parallel-map strategy: the only place concurrency enters the
//! crate. `Edx`/`Emm` `encrypt` farm each `(k, v)` pair through a
//! `ParallelMap`; the resulting label→ciphertext pairs are combined
//! into a dictionary, which is order-independent, so any strategy is
//! safe. A strategy object rather than a second `encrypt` path, since
//! `rayon` composes as a parameter.

pub trait ParallelMap: Send + Sync {
    /// Applies `f` to every item in `items`, returning results in the
    /// same order as `items` (callers must not rely on *when* each `f`
    /// ran, only that the returned `Vec` is positionally aligned).
    fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync;
}

/// Sequential fold. The default, and the only strategy available
/// without the `parallel` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialMap;

impl ParallelMap for SerialMap {
    fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        items.into_iter().map(f).collect()
    }
}

#[cfg(feature = "parallel")]
pub use rayon_impl::RayonMap;

#[cfg(feature = "parallel")]
mod rayon_impl {
    use super::ParallelMap;
    use rayon::prelude::*;

    /// `rayon`-backed fan-out, feature-gated `parallel`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct RayonMap;

    impl ParallelMap for RayonMap {
        fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
        where
            T: Send,
            R: Send,
            F: Fn(T) -> R + Send + Sync,
        {
            items.into_par_iter().map(f).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_map_preserves_order() {
        let strategy = SerialMap;
        let out = strategy.map(vec![1, 2, 3, 4], |x| x * x);
        assert_eq!(out, vec![1, 4, 9, 16]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn rayon_map_matches_serial_map() {
        let items: Vec<i64> = (0..200).collect();
        let serial = SerialMap.map(items.clone(), |x| x * 2);
        let parallel = rayon_impl::RayonMap.map(items, |x| x * 2);
        assert_eq!(serial, parallel);
    }
}
