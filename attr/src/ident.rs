//! Owned identifier for entity and property names. proc_macro2 idents are not Send,
//! and the metadata model outlives any single rendering pass.
use proc_macro2::TokenStream;
use quote::TokenStreamExt;
use serde::Serialize;

#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Ident(String);

impl Ident {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Ident {
    fn from(ident: &str) -> Self {
        Ident(ident.to_string())
    }
}

impl From<String> for Ident {
    fn from(ident: String) -> Self {
        Ident(ident)
    }
}

impl From<&String> for Ident {
    fn from(ident: &String) -> Self {
        Ident(ident.clone())
    }
}

/// Panics if the name is not a valid Rust identifier. Renderers are expected to
/// only call this on names produced by the naming strategies.
impl quote::ToTokens for Ident {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append(proc_macro2::Ident::new(&self.0, proc_macro2::Span::call_site()))
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T> PartialEq<T> for Ident
where
    T: AsRef<str>,
{
    fn eq(&self, t: &T) -> bool {
        let t = t.as_ref();
        self.0.as_str() == t
    }
}
