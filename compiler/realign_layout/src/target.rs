//! Platform presets.
//!
//! Word size and maximum alignment for each architecture the gc compiler
//! targets. Everything else about layout is derived from these two numbers.

use std::fmt;

/// An architecture's layout parameters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Target {
    /// `GOARCH` spelling.
    pub name: &'static str,
    pub word_size: u64,
    pub max_align: u64,
}

impl Target {
    pub const AMD64: Target = Target::new("amd64", 8, 8);
    pub const ARM64: Target = Target::new("arm64", 8, 8);
    pub const I386: Target = Target::new("386", 4, 4);
    pub const ARM: Target = Target::new("arm", 4, 4);
    pub const WASM: Target = Target::new("wasm", 8, 8);

    /// Every known architecture.
    pub const ALL: &'static [Target] = &[
        Target::I386,
        Target::AMD64,
        Target::new("amd64p32", 4, 8),
        Target::ARM,
        Target::ARM64,
        Target::new("loong64", 8, 8),
        Target::new("mips", 4, 4),
        Target::new("mipsle", 4, 4),
        Target::new("mips64", 8, 8),
        Target::new("mips64le", 8, 8),
        Target::new("ppc64", 8, 8),
        Target::new("ppc64le", 8, 8),
        Target::new("riscv64", 8, 8),
        Target::new("s390x", 8, 8),
        Target::new("sparc64", 8, 8),
        Target::WASM,
    ];

    pub const fn new(name: &'static str, word_size: u64, max_align: u64) -> Self {
        Target {
            name,
            word_size,
            max_align,
        }
    }

    /// Look up an architecture by its `GOARCH` name.
    pub fn lookup(name: &str) -> Option<Target> {
        Self::ALL.iter().copied().find(|t| t.name == name)
    }
}

impl Default for Target {
    fn default() -> Self {
        Target::AMD64
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests;
