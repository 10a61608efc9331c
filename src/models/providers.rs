//! Capability traits feeding the specialized completers.
//!
//! The dispatcher never reaches into application state directly; every
//! dynamic vocabulary (declared options, variables, color schemes, ...) and
//! every platform service (identity database, process environment) comes in
//! as a read-only capability object. New completion domains are new
//! providers, not new plumbing.

/// A read-only name list for one completion domain.
///
/// Variable vocabularies yield names as they appear in expressions, sigil
/// included (`$PAGER`), so a candidate can replace the typed text starting at
/// the `$`. Option and function vocabularies carry no sigil.
pub trait Vocabulary {
    fn names(&self) -> Vec<String>;
}

/// A source of opener program specifications for a given file name: the
/// association table on one side, content-sniffing handlers on the other.
/// Each returned entry is a full command specification (`tar -xf %f`); the
/// completer extracts the program name itself.
pub trait OpenerSource {
    fn programs_for(&self, file_name: &str) -> Vec<String>;
}

/// The platform identity database: user and group records.
pub trait IdentityDb {
    fn user_names(&self) -> Vec<String>;
    fn group_names(&self) -> Vec<String>;
    /// Home directory of the named account, if it exists.
    fn home_of(&self, user: &str) -> Option<String>;
}

/// The process environment as `NAME=value` pairs.
pub trait EnvSource {
    fn get(&self, name: &str) -> Option<String>;
    fn vars(&self) -> Vec<(String, String)>;
}

// =============================================================================
// Stock Implementations
// =============================================================================

/// A fixed name list, for static vocabularies and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticVocab(Vec<String>);

impl StaticVocab {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl Vocabulary for StaticVocab {
    fn names(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// An opener source with nothing to offer; stands in when content sniffing
/// is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpeners;

impl OpenerSource for NoOpeners {
    fn programs_for(&self, _file_name: &str) -> Vec<String> {
        Vec::new()
    }
}

/// The real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// An in-memory environment for tests.
#[derive(Clone, Debug, Default)]
pub struct FakeEnv(Vec<(String, String)>);

impl FakeEnv {
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl EnvSource for FakeEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.0.clone()
    }
}

/// An in-memory identity database for tests.
#[derive(Clone, Debug, Default)]
pub struct FakeIdentity {
    pub users: Vec<(String, String)>,
    pub groups: Vec<String>,
}

impl FakeIdentity {
    pub fn with_user(mut self, name: &str, home: &str) -> Self {
        self.users.push((name.to_string(), home.to_string()));
        self
    }

    pub fn with_group(mut self, name: &str) -> Self {
        self.groups.push(name.to_string());
        self
    }
}

impl IdentityDb for FakeIdentity {
    fn user_names(&self) -> Vec<String> {
        self.users.iter().map(|(n, _)| n.clone()).collect()
    }

    fn group_names(&self) -> Vec<String> {
        self.groups.clone()
    }

    fn home_of(&self, user: &str) -> Option<String> {
        self.users.iter().find(|(n, _)| n == user).map(|(_, h)| h.clone())
    }
}
