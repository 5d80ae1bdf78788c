//! Contract-related macros.
//!
//! This module contains:
//! - `#[contract]` - Attribute macro turning a trait into a dispatchable contract

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    FnArg, Ident, ItemTrait, LitStr, Pat, PatIdent, ReturnType, Signature, Token, TraitItem,
    TraitItemFn, Type, TypeParamBound, WherePredicate, parse::Parse, parse_macro_input,
    parse_quote,
};

/// Arguments for the `#[contract]` macro.
pub(crate) struct ContractArgs {
    pub name: Option<String>,
}

impl Parse for ContractArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ContractArgs { name })
    }
}

/// Implementation of the `#[contract]` macro.
pub fn contract_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ContractArgs);
    let mut input = parse_macro_input!(item as ItemTrait);

    match expand(args, &mut input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: ContractArgs, input: &mut ItemTrait) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "contract traits cannot be generic",
        ));
    }

    require_supertrait(input, "Send", parse_quote!(::core::marker::Send));
    require_supertrait(input, "Sync", parse_quote!(::core::marker::Sync));

    let mut forwards = Vec::new();
    for item in &input.items {
        match item {
            TraitItem::Fn(method) => {
                if let Some(forward) = forward_method(&input.ident, method)? {
                    forwards.push(forward);
                }
            }
            TraitItem::Type(ty) => {
                return Err(syn::Error::new_spanned(
                    ty,
                    "contract traits cannot have associated types",
                ));
            }
            TraitItem::Const(c) => {
                return Err(syn::Error::new_spanned(
                    c,
                    "contract traits cannot have associated consts",
                ));
            }
            _ => {}
        }
    }

    let trait_name = &input.ident;
    let vis = &input.vis;
    let contract_name = args.name.unwrap_or_else(|| trait_name.to_string());

    Ok(quote! {
        #input

        impl ::switchyard::Contract for dyn #trait_name {
            const NAME: &'static str = #contract_name;
        }

        impl #trait_name for ::switchyard::Dispatcher<dyn #trait_name> {
            #(#forwards)*
        }

        impl dyn #trait_name {
            /// Wrap `implementation` as an unconstrained candidate of this contract.
            #vis fn candidate<T: #trait_name + 'static>(
                name: &'static str,
                implementation: T,
            ) -> ::switchyard::Candidate<dyn #trait_name> {
                let implementation: ::std::sync::Arc<dyn #trait_name> =
                    ::std::sync::Arc::new(implementation);
                ::switchyard::Candidate::new(name, implementation)
            }
        }
    })
}

/// Add `bound` to the supertraits unless a bound with the same name is present.
fn require_supertrait(input: &mut ItemTrait, name: &str, bound: TypeParamBound) {
    let present = input.supertraits.iter().any(|b| match b {
        TypeParamBound::Trait(t) => t.path.segments.last().is_some_and(|s| s.ident == name),
        _ => false,
    });
    if !present {
        input.colon_token.get_or_insert_with(Default::default);
        input.supertraits.push(bound);
    }
}

/// Whether the method is excluded from trait objects by a `Self: Sized` bound.
fn requires_sized_self(sig: &Signature) -> bool {
    let Some(where_clause) = &sig.generics.where_clause else {
        return false;
    };
    where_clause.predicates.iter().any(|p| match p {
        WherePredicate::Type(t) => {
            matches!(&t.bounded_ty, Type::Path(p) if p.path.is_ident("Self"))
                && t.bounds.iter().any(|b| match b {
                    TypeParamBound::Trait(t) => {
                        t.path.segments.last().is_some_and(|s| s.ident == "Sized")
                    }
                    _ => false,
                })
        }
        _ => false,
    })
}

fn returns_result(sig: &Signature) -> bool {
    match &sig.output {
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(p) => p
                .path
                .segments
                .last()
                .is_some_and(|s| s.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

/// Generate the forwarding method for `method`, or `None` when the method is
/// not callable through a trait object and has a default body.
fn forward_method(
    trait_name: &Ident,
    method: &TraitItemFn,
) -> syn::Result<Option<TokenStream2>> {
    let sig = &method.sig;

    if requires_sized_self(sig) {
        if method.default.is_some() {
            return Ok(None);
        }
        return Err(syn::Error::new_spanned(
            sig,
            "contract methods bounded by `Self: Sized` need a default body",
        ));
    }

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "contract methods cannot be async",
        ));
    }

    if sig.generics.type_params().next().is_some() || sig.generics.const_params().next().is_some()
    {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "contract methods cannot be generic",
        ));
    }

    match sig.inputs.first() {
        Some(FnArg::Receiver(r))
            if r.reference.is_some() && r.mutability.is_none() && r.colon_token.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.ident,
                "contract methods must take `&self`",
            ));
        }
    }

    if !returns_result(sig) {
        return Err(syn::Error::new_spanned(
            &sig.output,
            "contract methods must return a `Result` whose error type implements `From<switchyard::ResolveError>`",
        ));
    }

    // Arguments may use arbitrary patterns; forward them through fresh idents.
    let mut forwarded_sig = sig.clone();
    let mut args = Vec::new();
    for (i, input) in forwarded_sig.inputs.iter_mut().skip(1).enumerate() {
        if let FnArg::Typed(pat_type) = input {
            let ident = format_ident!("__arg{}", i);
            *pat_type.pat = Pat::Ident(PatIdent {
                attrs: Vec::new(),
                by_ref: None,
                mutability: None,
                ident: ident.clone(),
                subpat: None,
            });
            args.push(ident);
        }
    }

    let method_name = &sig.ident;
    let kept_attrs = method
        .attrs
        .iter()
        .filter(|a| a.path().is_ident("cfg") || a.path().is_ident("doc"));

    // `#[deprecated]` has no effect on trait impl items; callers are warned
    // by the trait declaration, so only the inner call is silenced.
    let call = quote! {
        <dyn #trait_name as #trait_name>::#method_name(__target #(, #args)*)
    };
    let body = if method.attrs.iter().any(|a| a.path().is_ident("deprecated")) {
        quote! {
            #[allow(deprecated)]
            let __result = #call;
            __result
        }
    } else {
        call
    };

    Ok(Some(quote! {
        #(#kept_attrs)*
        #[inline]
        #forwarded_sig {
            let __target = ::switchyard::Dispatcher::resolve(self)?;
            #body
        }
    }))
}
