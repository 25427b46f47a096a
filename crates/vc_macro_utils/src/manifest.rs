use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, TableLike};

/// The caller's `Cargo.toml`, used to find how a workspace crate is reachable
/// from the crate that invokes a derive macro.
///
/// Generated code must name `vc_access` by a path that is valid in the
/// invoking crate, which may depend on it directly, under a renamed key, or
/// only through the `vc_compiled` umbrella crate.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_access"));
/// ```
///
/// # Resolution rules
///
/// For `dependencies`, then `dev-dependencies`:
///
/// 1. A key equal to the requested name returns `::name`.
/// 2. A key whose `package = "name"` returns `::key` (renamed dependency).
/// 3. For names starting with `vc_`, an umbrella dependency (`vc_compiled`
///    or `vc`) returns `::umbrella::short_name`, e.g. `vc_access` becomes
///    `::vc_compiled::access`.
///
/// Otherwise the absolute path `::name` is returned. A crate that needs to
/// name itself should add `extern crate self as name;` to its root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const CRATE_PREFIX: &str = "vc_";
const UMBRELLAS: [&str; 2] = ["vc_compiled", "vc"];
const DEPENDENCY_TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path)?.modified()
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()));
        Document::parse(text.into_boxed_str())
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        syn::parse_str(&format!("::{}", segments.join("::")))
            .unwrap_or_else(|_| panic!("`{}` is not a valid path", segments.join("::")))
    }

    // The `package = "..."` key of a renamed dependency, if any.
    fn renamed_package(item: &Item) -> Option<&str> {
        match item {
            Item::Table(table) => table.get("package")?.as_str(),
            Item::Value(value) => value.as_inline_table()?.get("package")?.as_str(),
            _ => None,
        }
    }

    fn find_in(deps: &dyn TableLike, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }

        for (key, item) in deps.iter() {
            if Self::renamed_package(item) == Some(name) {
                return Some(Self::absolute(&[key]));
            }
        }

        let short = name.strip_prefix(CRATE_PREFIX)?;
        UMBRELLAS
            .iter()
            .copied()
            .find(|umbrella| deps.contains_key(umbrella))
            .map(|umbrella| Self::absolute(&[umbrella, short]))
    }

    /// Returns a [`syn::Path`] naming the package `name` from the caller's
    /// crate. See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        DEPENDENCY_TABLES
            .iter()
            .filter_map(|table| self.manifest.get(table)?.as_table_like())
            .find_map(|deps| Self::find_in(deps, name))
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Runs `func` on the caller's parsed `Cargo.toml`.
    ///
    /// Manifests are cached per path and re-read only when the file's
    /// modification time changes. Reading and locking are not free, so a
    /// macro should call this once per invocation and reuse the result.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("The Cargo.toml should have a modified time.");

        {
            let cache = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<_> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let colon = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{colon}{}", segments.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nvc_access = { path = \"../vc_access\" }\n");
        assert_eq!(path_string(&m.get_crate_path("vc_access")), "::vc_access");
    }

    #[test]
    fn renamed_dependency() {
        let m = manifest("[dependencies]\nacc = { package = \"vc_access\", version = \"0.0.1\" }\n");
        assert_eq!(path_string(&m.get_crate_path("vc_access")), "::acc");
    }

    #[test]
    fn umbrella_dependency() {
        let m = manifest("[dev-dependencies]\nvc_compiled = \"0.0.1\"\n");
        assert_eq!(
            path_string(&m.get_crate_path("vc_access")),
            "::vc_compiled::access"
        );
    }

    #[test]
    fn fallback_to_absolute() {
        let m = manifest("[package]\nname = \"demo\"\n");
        assert_eq!(path_string(&m.get_crate_path("vc_access")), "::vc_access");
    }
}
