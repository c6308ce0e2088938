use super::value::Value;

const FNV_OFFSET_BASIS: u32 = 2166136261;
const FNV_PRIME: u32 = 16777619;

fn fnv1a(key: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in key.as_bytes() {
        hash ^= *byte as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[derive(Debug, Clone)]
enum Slot {
    Empty,
    Tombstone,
    Occupied(String, Value),
}

/// An open-addressed hash map with linear probing, keyed by string and
/// rehashed to keep its load factor at or below 0.5. Used for the VM's
/// global variable table.
///
/// Deletion marks the slot with a tombstone rather than clearing it to
/// `Empty`: a bare empty marker would break the probe chain for any key
/// that originally collided with the deleted one and was displaced past it,
/// making it permanently unreachable by lookup.
#[derive(Debug, Clone)]
pub struct LinearProbingHashMap {
    buckets: Vec<Slot>,
    len: usize,
}

impl LinearProbingHashMap {
    const INITIAL_CAPACITY: usize = 100;
    const MAX_LOAD_FACTOR: f64 = 0.5;

    pub fn new() -> Self {
        LinearProbingHashMap {
            buckets: (0..Self::INITIAL_CAPACITY).map(|_| Slot::Empty).collect(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    fn home(&self, key: &str) -> usize {
        (fnv1a(key) as usize) % self.buckets.len()
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        if self.load_factor() > Self::MAX_LOAD_FACTOR {
            self.grow();
        }

        let capacity = self.buckets.len();
        let mut index = self.home(key);
        let mut first_tombstone = None;

        for _ in 0..capacity {
            match &self.buckets[index] {
                Slot::Occupied(existing, _) if existing == key => {
                    self.buckets[index] = Slot::Occupied(key.to_string(), value);
                    return;
                }
                Slot::Empty => {
                    let target = first_tombstone.unwrap_or(index);
                    self.buckets[target] = Slot::Occupied(key.to_string(), value);
                    self.len += 1;
                    return;
                }
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Slot::Occupied(_, _) => {}
            }
            index = (index + 1) % capacity;
        }

        // Every slot probed and none free: force a grow and retry once.
        self.grow();
        self.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        let capacity = self.buckets.len();
        let mut index = self.home(key);

        for _ in 0..capacity {
            match &self.buckets[index] {
                Slot::Occupied(existing, value) if existing == key => return Some(value),
                Slot::Empty => return None,
                _ => {}
            }
            index = (index + 1) % capacity;
        }

        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let capacity = self.buckets.len();
        let mut index = self.home(key);

        for _ in 0..capacity {
            match &self.buckets[index] {
                Slot::Occupied(existing, _) if existing == key => {
                    let removed = std::mem::replace(&mut self.buckets[index], Slot::Tombstone);
                    self.len -= 1;
                    return match removed {
                        Slot::Occupied(_, value) => Some(value),
                        _ => unreachable!(),
                    };
                }
                Slot::Empty => return None,
                _ => {}
            }
            index = (index + 1) % capacity;
        }

        None
    }

    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let old_buckets = std::mem::replace(&mut self.buckets, (0..new_capacity).map(|_| Slot::Empty).collect());
        self.len = 0;

        for slot in old_buckets {
            if let Slot::Occupied(key, value) = slot {
                self.insert(&key, value);
            }
        }
    }
}

impl Default for LinearProbingHashMap {
    fn default() -> Self {
        Self::new()
    }
}
