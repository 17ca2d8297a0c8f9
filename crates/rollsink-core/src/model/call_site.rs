/// Source location of a log call
///
/// Usually built by the `call_site!` macro, which fills in `file!()`,
/// `module_path!()` and `line!()` at the call place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    function: &'static str,
    line: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn function(&self) -> &'static str {
        self.function
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Capture the call site of the macro invocation
///
/// # Example
///
/// ```
/// let site = rollsink_core::call_site!();
/// assert!(site.file().ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::model::CallSite::new(file!(), module_path!(), line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_captures_location() {
        let site = crate::call_site!();
        assert!(site.file().ends_with("call_site.rs"));
        assert!(site.function().contains("call_site"));
        assert!(site.line() > 0);
    }

    #[test]
    fn test_const_construction() {
        const SITE: CallSite = CallSite::new("main.rs", "app::main", 7);
        assert_eq!(SITE.file(), "main.rs");
        assert_eq!(SITE.function(), "app::main");
        assert_eq!(SITE.line(), 7);
    }
}
