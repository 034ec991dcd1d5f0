/// Single-slot cache: holds the value computed for the last key and only
/// recomputes when asked for a different key.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    computations: usize,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo {
            slot: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce(&K) -> V,
    {
        let entry = match self.slot.take() {
            Some((k, v)) if k == key => (k, v),
            _ => {
                let value = compute(&key);
                self.computations += 1;
                (key, value)
            }
        };
        &self.slot.insert(entry).1
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// How many times the value has been (re)computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
