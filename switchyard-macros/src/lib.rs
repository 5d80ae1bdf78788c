use proc_macro::TokenStream;

mod contract;

/// Turn a trait into a Switchyard contract.
///
/// Generates:
/// - `Send + Sync` supertraits, when missing
/// - `impl Contract for dyn Trait`, named after the trait unless
///   `name = "..."` is given
/// - `impl Trait for Dispatcher<dyn Trait>`: each method resolves the
///   contract against the current context and forwards to the winner
/// - `<dyn Trait>::candidate(name, implementation)` to build candidates
///
/// Every method must take `&self`, must not be generic or async, and must
/// return a `Result` whose error type implements
/// `From<switchyard::ResolveError>`, so resolution failures reach the caller
/// through the method's own return type. `#[cfg]` and doc attributes are
/// carried over to the forwarding methods.
///
/// # Example
///
/// ```rust,ignore
/// #[switchyard::contract(name = "com.demo.FooService")]
/// pub trait FooService {
///     fn get_some(&self) -> Result<String, BoxError>;
/// }
///
/// let proxy: Dispatcher<dyn FooService> = registry.dispatcher(provider)?;
/// let value = proxy.get_some()?;
/// ```
#[proc_macro_attribute]
pub fn contract(attr: TokenStream, item: TokenStream) -> TokenStream {
    contract::contract_impl(attr, item)
}
