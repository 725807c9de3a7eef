// src/namespace/arch.rs

//! Known architecture names for `name.arch` dependencies

/// Built-in architecture table
///
/// Matching is exact and case-sensitive. Configuration can append entries
/// but never remove these.
pub const KNOWN_ARCHES: &[&str] = &[
    "i386", "i486", "i586", "i686", "athlon", "pentium3", "pentium4", "x86_64", "amd64", "ia32e",
    "alpha", "alphaev5", "alphaev56", "alphapca56", "alphaev6", "alphaev67", "sparc", "sun4",
    "sun4m", "sun4c", "sun4d", "sparcv8", "sparcv9", "sparcv9b", "sparcv9v", "sparcv9v2",
    "sparc64", "sun4u", "sparc64v", "mips", "mipsel", "IP", "ppc", "ppciseries", "ppcpseries",
    "ppc64", "ppc64iseries", "ppc64pseries", "m68k", "rs6000", "ia64", "armv3l", "armv4b",
    "armv4l", "armv5teb", "armv5tel", "armv5tejl", "armv6l", "s390", "i370", "s390x", "sh", "sh3",
    "sh4", "sh4a", "xtensa", "noarch", "fat",
];

/// Is `name` in the built-in table or in `extra`?
pub fn is_known_arch(name: &str, extra: &[String]) -> bool {
    KNOWN_ARCHES.contains(&name) || extra.iter().any(|arch| arch == name)
}
