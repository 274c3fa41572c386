//! ES module import and export records.
//!
//! Purely descriptive: the parser produces one [`Module`] per module
//! function, and a linking pass outside this crate consumes it.

use crate::Name;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportEntry {
    pub module_request: Option<Name>,
    pub import_name: Name,
    pub local_name: Name,
    pub start: u32,
    pub finish: u32,
}

impl ImportEntry {
    /// `import { import_name as local_name }`.
    pub fn import_specifier(import_name: Name, local_name: Name, start: u32, finish: u32) -> Self {
        ImportEntry {
            module_request: None,
            import_name,
            local_name,
            start,
            finish,
        }
    }

    /// `import local_name from ...`.
    pub fn import_default(local_name: Name, start: u32, finish: u32) -> Self {
        Self::import_specifier(Name::DEFAULT, local_name, start, finish)
    }

    /// `import * as local_name from ...`.
    pub fn import_star_as_namespace(local_name: Name, start: u32, finish: u32) -> Self {
        Self::import_specifier(Name::STAR, local_name, start, finish)
    }

    /// Attach the `from` clause once it has been parsed.
    #[must_use]
    pub fn with_from(self, module_request: Name, finish: u32) -> Self {
        ImportEntry {
            module_request: Some(module_request),
            finish,
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportEntry {
    pub export_name: Option<Name>,
    pub module_request: Option<Name>,
    pub import_name: Option<Name>,
    pub local_name: Option<Name>,
    pub start: u32,
    pub finish: u32,
}

impl ExportEntry {
    /// `export * from ...`.
    pub fn export_star_from(start: u32, finish: u32) -> Self {
        ExportEntry {
            export_name: None,
            module_request: None,
            import_name: Some(Name::STAR),
            local_name: None,
            start,
            finish,
        }
    }

    /// `export default ...`, bound locally as `local_name`.
    pub fn export_default(local_name: Name, start: u32, finish: u32) -> Self {
        ExportEntry {
            export_name: Some(Name::DEFAULT),
            module_request: None,
            import_name: None,
            local_name: Some(local_name),
            start,
            finish,
        }
    }

    /// `export { local_name as export_name }`.
    pub fn export_specifier(local_name: Name, export_name: Name, start: u32, finish: u32) -> Self {
        ExportEntry {
            export_name: Some(export_name),
            module_request: None,
            import_name: None,
            local_name: Some(local_name),
            start,
            finish,
        }
    }

    /// Attach a `from` clause. The local name becomes the import name.
    #[must_use]
    pub fn with_from(self, module_request: Name, finish: u32) -> Self {
        let import_name = self.import_name.or(self.local_name);
        ExportEntry {
            module_request: Some(module_request),
            import_name,
            local_name: None,
            finish,
            ..self
        }
    }

    fn is_star(&self) -> bool {
        self.import_name == Some(Name::STAR) && self.export_name.is_none()
    }
}

/// Import and export metadata of one module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    pub requested_modules: Vec<Name>,
    pub import_entries: Vec<ImportEntry>,
    pub local_export_entries: Vec<ExportEntry>,
    pub indirect_export_entries: Vec<ExportEntry>,
    pub star_export_entries: Vec<ExportEntry>,
}

impl Module {
    /// Local name is exported under some name.
    pub fn exports_local(&self, local_name: Name) -> bool {
        self.local_export_entries
            .iter()
            .any(|e| e.local_name == Some(local_name))
    }
}

/// Accumulates entries while a module is parsed.
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn request(&mut self, module_request: Option<Name>) {
        if let Some(request) = module_request {
            if !self.module.requested_modules.contains(&request) {
                self.module.requested_modules.push(request);
            }
        }
    }

    pub fn add_import(&mut self, entry: ImportEntry) {
        self.request(entry.module_request);
        self.module.import_entries.push(entry);
    }

    /// Classify an export: no module request is local, `*` is a star
    /// re-export, anything else is an indirect re-export.
    pub fn add_export(&mut self, entry: ExportEntry) {
        self.request(entry.module_request);
        if entry.module_request.is_none() {
            self.module.local_export_entries.push(entry);
        } else if entry.is_star() {
            self.module.star_export_entries.push(entry);
        } else {
            self.module.indirect_export_entries.push(entry);
        }
    }

    pub fn build(self) -> Module {
        self.module
    }
}
