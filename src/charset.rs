use std::fmt;

/// Membership set over all 256 byte values.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CharSet {
    bits: [u64; 4],
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(byte: u8) -> Self {
        let mut set = Self::new();
        set.insert(byte);
        set
    }

    /// Inclusive range; the endpoints may be given in either order.
    pub fn range(a: u8, b: u8) -> Self {
        let mut set = Self::new();
        set.insert_range(a, b);
        set
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.bits[(byte >> 6) as usize] & (1 << (byte & 63)) != 0
    }

    pub fn insert(&mut self, byte: u8) -> &mut Self {
        self.bits[(byte >> 6) as usize] |= 1 << (byte & 63);
        self
    }

    pub fn insert_range(&mut self, a: u8, b: u8) -> &mut Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for byte in lo..=hi {
            self.insert(byte);
        }
        self
    }

    pub fn union(&mut self, other: &CharSet) -> &mut Self {
        for (word, theirs) in self.bits.iter_mut().zip(other.bits) {
            *word |= theirs;
        }
        self
    }

    pub fn complement(&mut self) -> &mut Self {
        for word in &mut self.bits {
            *word = !*word;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == [0; 4]
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&b| self.contains(b))
    }
}

impl FromIterator<u8> for CharSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for byte in iter {
            set.insert(byte);
        }
        set
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharSet({self})")
    }
}

/// Renders as a bracketed class, collapsing runs into `a-z` ranges.
impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut bytes = self.iter().peekable();
        while let Some(lo) = bytes.next() {
            let mut hi = lo;
            while bytes.peek() == Some(&hi.wrapping_add(1)) && hi != u8::MAX {
                hi = bytes.next().unwrap_or(hi);
            }
            write!(f, "{}", std::ascii::escape_default(lo))?;
            if hi > lo {
                if hi > lo + 1 {
                    write!(f, "-")?;
                }
                write!(f, "{}", std::ascii::escape_default(hi))?;
            }
        }
        write!(f, "]")
    }
}
