use super::{Hasher, E};

/// Not a hash in a strict sense: collects a byte histogram of the content and produces the
/// Shannon entropy of it (bits per byte, from `0.0` up to `8.0`).
pub struct Entropy {
    histogram: Option<[u64; 256]>,
    size: u64,
    value: Option<f64>,
    bytes: [u8; 8],
}

impl Default for Entropy {
    fn default() -> Self {
        Self::new()
    }
}

impl Entropy {
    pub fn new() -> Self {
        Entropy {
            histogram: Some([0; 256]),
            size: 0,
            value: None,
            bytes: [0; 8],
        }
    }

    /// Entropy of absorbed content; available after `finish()`.
    pub fn value(&self) -> Result<f64, E> {
        self.value.ok_or(E::NotFinished)
    }
}

impl Hasher for Entropy {
    fn absorb(&mut self, data: &[u8]) -> Result<(), E> {
        let histogram = self.histogram.as_mut().ok_or(E::AlreadyFinished)?;
        for byte in data {
            histogram[*byte as usize] += 1;
        }
        self.size += data.len() as u64;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), E> {
        let Some(histogram) = self.histogram.take() else {
            return Err(E::AlreadyFinished);
        };
        let mut entropy = 0f64;
        for count in histogram.iter().filter(|count| **count > 0) {
            let freq = *count as f64 / self.size as f64;
            entropy -= freq * freq.log2();
        }
        self.bytes = entropy.to_be_bytes();
        self.value = Some(entropy);
        Ok(())
    }

    fn hash(&self) -> Result<&[u8], E> {
        if self.value.is_none() {
            return Err(E::NotFinished);
        }
        Ok(&self.bytes[..])
    }

    fn encode(&self) -> Result<String, E> {
        Ok(format!("{:.6}", self.value()?))
    }
}
