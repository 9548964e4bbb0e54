//! Runtime loading of platform libraries.
//!
//! Platform APIs are resolved at runtime instead of linked, so a missing
//! library only disables the backend that needs it. Tables of function
//! pointers are declared with [`dynamic_api!`](crate::dynamic_api).

mod api;

use libloading::Library;

use crate::error::{PlatformError, Result};

/// A loaded shared library.
#[derive(Debug)]
pub struct Module {
    name: String,
    library: Library,
}

impl Module {
    /// Opens a shared library by file name or path.
    pub fn open(name: &str) -> Result<Self> {
        // Safety: library initialisers run here; platform libraries are trusted.
        let library = unsafe { Library::new(name) }.map_err(|source| PlatformError::ModuleLoad {
            name: name.to_string(),
            source,
        })?;
        log::debug!("module loaded: {name}");
        Ok(Self { name: name.to_string(), library })
    }

    /// Opens the first library in `names` that loads.
    pub fn open_any(names: &[&str]) -> Result<Self> {
        for name in names {
            match Self::open(name) {
                Ok(module) => return Ok(module),
                Err(e) => log::debug!("{e}"),
            }
        }
        Err(PlatformError::ModuleNotFound(names.iter().map(|n| n.to_string()).collect()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves `symbol` as a value of type `T` (normally an `extern "C"` fn pointer).
    ///
    /// Missing symbols are logged and returned as `None`.
    ///
    /// # Safety
    /// `T` must match the real type of the exported symbol, and the returned
    /// value must not be used after this module is dropped.
    pub unsafe fn symbol<T: Copy>(&self, symbol: &str, verbose: bool) -> Option<T> {
        match unsafe { self.library.get::<T>(symbol.as_bytes()) } {
            Ok(sym) => {
                if verbose {
                    log::info!("function loaded: {symbol}");
                }
                Some(*sym)
            }
            Err(_) => {
                log::warn!("function not loaded: {symbol} ({})", self.name);
                None
            }
        }
    }

    /// Unloads the library, reporting failures instead of ignoring them on drop.
    pub fn close(self) -> Result<()> {
        let name = self.name;
        self.library
            .close()
            .map_err(|source| PlatformError::ModuleLoad { name: name.clone(), source })?;
        log::debug!("module unloaded: {name}");
        Ok(())
    }
}
