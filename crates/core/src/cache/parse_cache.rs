use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use lru::LruCache;
use tree_sitter::Tree;

use crate::error::Result;
use crate::parser::JavaParser;

struct CachedParse {
    hash: String,
    tree: Tree,
}

/// Bounded cache of parse trees keyed by file path and validated by content
/// hash. Purely an optimization for repeated loads; a stale or evicted entry
/// is transparently re-parsed, so results never differ from parsing fresh.
pub struct ParseCache {
    entries: LruCache<PathBuf, CachedParse>,
    hits: u64,
}

impl ParseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(capacity.max(1)).expect("nonzero capacity")),
            hits: 0,
        }
    }

    pub fn get_or_parse(
        &mut self,
        parser: &mut JavaParser,
        path: &Path,
        source: &str,
    ) -> Result<Tree> {
        let hash = format!("{:x}", md5::compute(source.as_bytes()));
        if let Some(entry) = self.entries.get(path) {
            if entry.hash == hash {
                tracing::trace!("Parse cache hit: {:?}", path);
                self.hits += 1;
                return Ok(entry.tree.clone());
            }
        }

        let tree = parser.parse(source)?;
        self.entries.put(
            path.to_path_buf(),
            CachedParse {
                hash,
                tree: tree.clone(),
            },
        );
        Ok(tree)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
