// src/namespace/kind.rs

//! Dependency namespace kinds
//!
//! A dependency name is not always a package name. It can be a file path, a
//! shared object, a macro expansion, an architecture-qualified name, or one
//! of the probe expressions such as `rpmlib(PayloadIsXz)` or
//! `user(nobody)` that ask a question about the running system.

use std::fmt;

/// What a dependency name expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    /// Plain name with no other structure
    /// Example: bash
    String,

    /// Absolute file path
    /// Example: /usr/bin/python3
    Path,

    /// Shared object reference
    /// Example: libc.so.6(GLIBC_2.34)(64bit)
    Dso,

    /// Macro expansion
    /// Example: %{_bindir}
    Function,

    /// Name with an architecture suffix
    /// Example: glibc.x86_64
    Arch,

    /// Bare version-looking name
    /// Example: python3.11
    Version,

    /// Dotted name
    /// Example: java.util
    Compound,

    /// Any other keyword(argument) form
    /// Example: perl(DBI)
    Namespace,

    /// rpmlib(feature)
    Rpmlib,
    /// cpuinfo(flag)
    Cpuinfo,
    /// getconf(variable)
    Getconf,
    /// uname(field)
    Uname,
    /// soname(path)
    Soname,
    /// exists(path), readable(path), rwx(path) and the other access modes
    Access,
    /// user(name)
    User,
    /// group(name)
    Group,
    /// mounted(path)
    Mounted,
    /// diskspace(path)
    Diskspace,
    /// digest(algo:path)
    Digest,
    /// gnupg(path)
    Gnupg,
    /// macro(name)
    Macro,
    /// envvar(name)
    Envvar,
    /// running(process)
    Running,
    /// sanitycheck(script)
    Sanity,
    /// vcheck(url)
    Vcheck,
    /// signature(path:sigpath:pubkey)
    Signature,
    /// verify(package)
    Verify,
    /// config(package)
    Config,
}

/// Probe keywords, tested in order
///
/// The access-mode spellings use `r`/`w`/`x` for "must be", the upper-case
/// letter for "must also be", and `_` for "don't care".
pub(crate) const PROBES: &[(&str, NamespaceKind)] = &[
    ("rpmlib", NamespaceKind::Rpmlib),
    ("config", NamespaceKind::Config),
    ("cpuinfo", NamespaceKind::Cpuinfo),
    ("getconf", NamespaceKind::Getconf),
    ("uname", NamespaceKind::Uname),
    ("soname", NamespaceKind::Soname),
    ("user", NamespaceKind::User),
    ("group", NamespaceKind::Group),
    ("mounted", NamespaceKind::Mounted),
    ("diskspace", NamespaceKind::Diskspace),
    ("digest", NamespaceKind::Digest),
    ("gnupg", NamespaceKind::Gnupg),
    ("macro", NamespaceKind::Macro),
    ("envvar", NamespaceKind::Envvar),
    ("running", NamespaceKind::Running),
    ("sanitycheck", NamespaceKind::Sanity),
    ("vcheck", NamespaceKind::Vcheck),
    ("signature", NamespaceKind::Signature),
    ("verify", NamespaceKind::Verify),
    ("exists", NamespaceKind::Access),
    ("executable", NamespaceKind::Access),
    ("readable", NamespaceKind::Access),
    ("writable", NamespaceKind::Access),
    ("RWX", NamespaceKind::Access),
    ("RWx", NamespaceKind::Access),
    ("RW_", NamespaceKind::Access),
    ("RwX", NamespaceKind::Access),
    ("Rwx", NamespaceKind::Access),
    ("Rw_", NamespaceKind::Access),
    ("R_X", NamespaceKind::Access),
    ("R_x", NamespaceKind::Access),
    ("R__", NamespaceKind::Access),
    ("rWX", NamespaceKind::Access),
    ("rWx", NamespaceKind::Access),
    ("rW_", NamespaceKind::Access),
    ("rwX", NamespaceKind::Access),
    ("rwx", NamespaceKind::Access),
    ("rw_", NamespaceKind::Access),
    ("r_X", NamespaceKind::Access),
    ("r_x", NamespaceKind::Access),
    ("r__", NamespaceKind::Access),
    ("_WX", NamespaceKind::Access),
    ("_Wx", NamespaceKind::Access),
    ("_W_", NamespaceKind::Access),
    ("_wX", NamespaceKind::Access),
    ("_wx", NamespaceKind::Access),
    ("_w_", NamespaceKind::Access),
    ("__X", NamespaceKind::Access),
    ("__x", NamespaceKind::Access),
    ("___", NamespaceKind::Access),
];

impl NamespaceKind {
    /// Short lowercase name, as printed by diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Path => "path",
            Self::Dso => "dso",
            Self::Function => "function",
            Self::Arch => "arch",
            Self::Version => "version",
            Self::Compound => "compound",
            Self::Namespace => "namespace",
            Self::Rpmlib => "rpmlib",
            Self::Cpuinfo => "cpuinfo",
            Self::Getconf => "getconf",
            Self::Uname => "uname",
            Self::Soname => "soname",
            Self::Access => "access",
            Self::User => "user",
            Self::Group => "group",
            Self::Mounted => "mounted",
            Self::Diskspace => "diskspace",
            Self::Digest => "digest",
            Self::Gnupg => "gnupg",
            Self::Macro => "macro",
            Self::Envvar => "envvar",
            Self::Running => "running",
            Self::Sanity => "sanitycheck",
            Self::Vcheck => "vcheck",
            Self::Signature => "signature",
            Self::Verify => "verify",
            Self::Config => "config",
        }
    }

    /// Look up a probe keyword
    ///
    /// Case-sensitive: the access-mode spellings differ only by case.
    pub fn from_probe_keyword(keyword: &str) -> Option<Self> {
        PROBES
            .iter()
            .find(|(kw, _)| *kw == keyword)
            .map(|(_, kind)| *kind)
    }

    /// Return all namespace kinds
    pub fn all() -> &'static [NamespaceKind] {
        &[
            Self::String,
            Self::Path,
            Self::Dso,
            Self::Function,
            Self::Arch,
            Self::Version,
            Self::Compound,
            Self::Namespace,
            Self::Rpmlib,
            Self::Cpuinfo,
            Self::Getconf,
            Self::Uname,
            Self::Soname,
            Self::Access,
            Self::User,
            Self::Group,
            Self::Mounted,
            Self::Diskspace,
            Self::Digest,
            Self::Gnupg,
            Self::Macro,
            Self::Envvar,
            Self::Running,
            Self::Sanity,
            Self::Vcheck,
            Self::Signature,
            Self::Verify,
            Self::Config,
        ]
    }

    /// Is this one of the fixed `keyword(argument)` probes?
    pub fn is_probe(&self) -> bool {
        !matches!(
            self,
            Self::String
                | Self::Path
                | Self::Dso
                | Self::Function
                | Self::Arch
                | Self::Version
                | Self::Compound
                | Self::Namespace
        )
    }

    /// Does this kind carry a namespace keyword in its record?
    pub fn has_keyword(&self) -> bool {
        self.is_probe() || *self == Self::Namespace
    }

    /// Get a human-readable description of this kind
    pub fn description(&self) -> &'static str {
        match self {
            Self::String => "Plain name",
            Self::Path => "File path",
            Self::Dso => "Shared object",
            Self::Function => "Macro expansion",
            Self::Arch => "Architecture-qualified name",
            Self::Version => "Versioned name",
            Self::Compound => "Dotted name",
            Self::Namespace => "Namespaced name",
            Self::Rpmlib => "Package manager feature",
            Self::Cpuinfo => "CPU feature probe",
            Self::Getconf => "System configuration probe",
            Self::Uname => "Kernel identity probe",
            Self::Soname => "Shared object probe",
            Self::Access => "File access probe",
            Self::User => "User account probe",
            Self::Group => "Group probe",
            Self::Mounted => "Mount point probe",
            Self::Diskspace => "Free space probe",
            Self::Digest => "File digest probe",
            Self::Gnupg => "Detached signature probe",
            Self::Macro => "Macro definition probe",
            Self::Envvar => "Environment variable probe",
            Self::Running => "Running process probe",
            Self::Sanity => "Sanity check script",
            Self::Vcheck => "Upstream version check",
            Self::Signature => "Signature probe",
            Self::Verify => "Package verification probe",
            Self::Config => "Configuration dependency",
        }
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
