pub mod models;

pub use models::*;

/// All declarations found under a source directory, in walk order.
///
/// Lookups scan files in order and declarations within a file in order, so when
/// several declarations share a name the first one found wins.
#[derive(Debug, Default)]
pub struct DeclarationIndex {
    files: Vec<ScannedFile>,
}

impl DeclarationIndex {
    pub fn new(files: Vec<ScannedFile>) -> Self {
        Self { files }
    }

    pub fn push(&mut self, file: ScannedFile) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[ScannedFile] {
        &self.files
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.files.iter().flat_map(|f| f.declarations.iter())
    }

    pub fn len(&self) -> usize {
        self.declarations().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the first declaration named `name` along with the file holding it
    pub fn find(&self, name: &str) -> Option<(&ScannedFile, &Declaration)> {
        self.files.iter().find_map(|file| {
            file.declarations
                .iter()
                .find(|d| d.name == name)
                .map(|d| (file, d))
        })
    }

    /// Declarations that share a name with an earlier one and are never used
    pub fn shadowed(&self) -> Vec<&Declaration> {
        let mut seen = std::collections::HashSet::new();
        self.declarations()
            .filter(|d| !seen.insert(d.name.as_str()))
            .collect()
    }
}
