//! # Capability Contract
//!
//! A capability is a pluggable behavior with a stable name. It is declared
//! once as a marker type implementing [`Capability`], and implemented any
//! number of times by types implementing [`Extension`].
//!
//! ```rust
//! use bizext_core::{BoxError, Capability, Extension};
//!
//! struct Say;
//!
//! impl Capability for Say {
//!     const ID: &'static str = "greeting::Say";
//!     type Context = str;
//!     type Output = String;
//! }
//!
//! struct SayHello;
//!
//! impl Extension<Say> for SayHello {
//!     fn exec(&self, name: &str) -> Result<String, BoxError> {
//!         Ok(format!("hello, {name}"))
//!     }
//! }
//!
//! assert_eq!(SayHello.exec("bob").unwrap(), "hello, bob");
//! ```

use crate::error::BoxError;

/// Declares a capability: its stable id and its call signature.
///
/// Implemented by a marker type; the type itself is never instantiated by
/// the runtime. Two capability types must not share one [`ID`](Self::ID).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Capability`",
    label = "missing `Capability` implementation",
    note = "Declare the capability with `bizext::capability!` or implement `Capability` by hand."
)]
pub trait Capability: 'static {
    /// Stable identity used as the first half of every coordinate.
    const ID: &'static str;

    /// The caller-supplied context passed to `support` and `exec`.
    type Context: ?Sized;

    /// The result produced by one implementation.
    type Output;
}

/// One implementation of a capability.
///
/// `support` is an opaque predicate deciding whether this implementation
/// handles the given context. It defaults to `true`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Extension<{C}>`",
    label = "missing `Extension` implementation",
    note = "Extensions must implement `exec` for the capability `{C}`."
)]
pub trait Extension<C: Capability>: Send + Sync + 'static {
    /// Whether this implementation handles `ctx`.
    fn support(&self, ctx: &C::Context) -> bool {
        let _ = ctx;
        true
    }

    /// Run the implementation.
    fn exec(&self, ctx: &C::Context) -> Result<C::Output, BoxError>;
}

/// A predicate over a context, used by [`FnExtension`].
pub trait SupportPredicate<T: ?Sized>: Send + Sync + 'static {
    /// Evaluate the predicate.
    fn test(&self, ctx: &T) -> bool;
}

/// Predicate that accepts every context.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSupported;

impl<T: ?Sized> SupportPredicate<T> for AlwaysSupported {
    fn test(&self, _ctx: &T) -> bool {
        true
    }
}

impl<T, F> SupportPredicate<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    fn test(&self, ctx: &T) -> bool {
        (self)(ctx)
    }
}

/// An extension built from closures.
///
/// Each closure has its own type, so two `FnExtension`s built from different
/// closures are different concrete types for duplicate detection.
///
/// ```rust,ignore
/// let shout = FnExtension::new(|name: &str| Ok(name.to_uppercase()))
///     .with_support(|name: &str| !name.is_empty());
/// ```
pub struct FnExtension<F, S = AlwaysSupported> {
    exec: F,
    support: S,
}

impl<F> FnExtension<F> {
    /// Wrap an `exec` closure; the extension supports every context.
    pub fn new(exec: F) -> Self {
        Self {
            exec,
            support: AlwaysSupported,
        }
    }
}

impl<F, S> FnExtension<F, S> {
    /// Replace the support predicate.
    pub fn with_support<S2>(self, support: S2) -> FnExtension<F, S2> {
        FnExtension {
            exec: self.exec,
            support,
        }
    }
}

impl<C, F, S> Extension<C> for FnExtension<F, S>
where
    C: Capability,
    F: Fn(&C::Context) -> Result<C::Output, BoxError> + Send + Sync + 'static,
    S: SupportPredicate<C::Context>,
{
    fn support(&self, ctx: &C::Context) -> bool {
        self.support.test(ctx)
    }

    fn exec(&self, ctx: &C::Context) -> Result<C::Output, BoxError> {
        (self.exec)(ctx)
    }
}

/// Declares a capability marker type.
///
/// The id defaults to the fully qualified path of the marker type.
///
/// ```rust,ignore
/// bizext::capability! {
///     /// Builds a greeting for a name.
///     pub Say: str => String
/// }
///
/// bizext::capability! {
///     pub Price = "pricing.Price", Order => u64
/// }
/// ```
#[macro_export]
macro_rules! capability {
    ($(#[$meta:meta])* $vis:vis $name:ident : $ctx:ty => $out:ty) => {
        $crate::capability! {
            $(#[$meta])*
            $vis $name = ::core::concat!(::core::module_path!(), "::", ::core::stringify!($name)),
            $ctx => $out
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = $id:expr, $ctx:ty => $out:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::Capability for $name {
            const ID: &'static str = $id;
            type Context = $ctx;
            type Output = $out;
        }
    };
}
