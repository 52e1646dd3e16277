use proc_macro2::{Delimiter, TokenStream as TokenStream2, TokenTree};
use quote::ToTokens;
use syn::{
    parse::{Parse, ParseStream},
    Ident, LitStr, Result, Token,
};

pub struct RustyIdent {
    prefix: Option<String>,
    inner: Vec<MacroInside>,
}

impl Parse for RustyIdent {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut prefix = None;
        if input.peek(Ident) && input.peek2(Token![=]) {
            let key: Ident = input.parse()?;
            if key != "prefix" {
                return Err(syn::Error::new(key.span(), "expected `prefix`"));
            }
            input.parse::<Token![=]>()?;
            let lit: LitStr = input.parse()?;
            input.parse::<Token![;]>()?;
            prefix = Some(lit.value());
        }
        let mut inner = Vec::new();
        while !input.is_empty() {
            inner.push(input.parse()?);
        }
        Ok(Self { prefix, inner })
    }
}

impl ToTokens for RustyIdent {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let subst = Subst {
            prefix: self.prefix.as_deref(),
        };
        self.inner
            .iter()
            .for_each(|x| x.to_tokens_with(&subst, tokens))
    }
}

struct MacroInside {
    mac: Ident,
    exc: Token![!],
    delim: Delimiter,
    content: TokenStream2,
}

impl Parse for MacroInside {
    fn parse(input: ParseStream) -> Result<Self> {
        let mac: Ident = input.parse()?;
        let exc = input.parse::<Token![!]>()?;
        let g: proc_macro2::Group = input.parse()?;
        Ok(Self {
            mac,
            exc,
            delim: g.delimiter(),
            content: g.stream(),
        })
    }
}

impl MacroInside {
    fn to_tokens_with(&self, subst: &Subst<'_>, tokens: &mut TokenStream2) {
        self.mac.to_tokens(tokens);
        self.exc.to_tokens(tokens);
        let content: TokenStream2 = self
            .content
            .clone()
            .into_iter()
            .map(|t| subst.token_tree(t))
            .collect();
        proc_macro2::Group::new(self.delim, content).to_tokens(tokens);
    }
}

struct Subst<'a> {
    prefix: Option<&'a str>,
}

impl Subst<'_> {
    fn token_tree(&self, t: TokenTree) -> TokenStream2 {
        let mut stream = TokenStream2::new();
        match t {
            TokenTree::Ident(ref id) => match self.rename(&id.to_string()) {
                Some(new_id) => Ident::new(&new_id, id.span()).to_tokens(&mut stream),
                None => t.to_tokens(&mut stream),
            },
            TokenTree::Group(ref g) => {
                let content: TokenStream2 =
                    g.stream().into_iter().map(|t| self.token_tree(t)).collect();
                let mut group = proc_macro2::Group::new(g.delimiter(), content);
                group.set_span(g.span());
                group.to_tokens(&mut stream);
            }
            _ => t.to_tokens(&mut stream),
        }
        stream
    }

    fn rename(&self, id: &str) -> Option<String> {
        if let Some(stripped) = self.prefix.and_then(|p| id.strip_prefix(p)) {
            if stripped.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return Some(screaming_snake_case_to_pascal_case(stripped));
            }
        }
        id.strip_prefix("VI_")
            .map(screaming_snake_case_to_pascal_case)
    }
}

fn screaming_snake_case_to_pascal_case(input: &str) -> String {
    input
        .split('_')
        .filter(|x| !x.is_empty())
        .map(|x| x[..1].to_owned() + &x[1..].to_ascii_lowercase())
        .collect()
}
