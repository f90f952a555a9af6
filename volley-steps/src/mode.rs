use volley_core::{retract, ActionError, Address, Phase, Session, Step};

mod sealed {
    pub trait Sealed {}
}

/// Decides what a terminal builder call produces.
///
/// Builders reached from `expect()` or `send()` use [`Check`] and produce the step itself.
/// The same builders reached from `clear()` use [`Clear`] and produce a step that retracts
/// every step whose address starts with the builder's address.
pub trait Mode: sealed::Sealed {
    #[doc(hidden)]
    fn finish<F>(address: Address, phase: Phase, action: F) -> Step
    where
        F: FnOnce(&mut Session) -> Result<(), ActionError> + Send + 'static;
}

pub struct Check;

pub struct Clear;

impl sealed::Sealed for Check {}
impl sealed::Sealed for Clear {}

impl Mode for Check {
    #[track_caller]
    fn finish<F>(address: Address, phase: Phase, action: F) -> Step
    where
        F: FnOnce(&mut Session) -> Result<(), ActionError> + Send + 'static,
    {
        Step::addressed(phase, address, action)
    }
}

impl Mode for Clear {
    #[track_caller]
    fn finish<F>(address: Address, _phase: Phase, _action: F) -> Step
    where
        F: FnOnce(&mut Session) -> Result<(), ActionError> + Send + 'static,
    {
        clear_step(address)
    }
}

/// A clean step removing every step addressed under `pattern`.
#[track_caller]
pub(crate) fn clear_step(pattern: Address) -> Step {
    let address = Address::root("clear").join(&pattern);
    Step::addressed(Phase::Clean, address, move |s| {
        retract(s, &pattern)?;
        Ok(())
    })
}

/// Declares a builder that carries its address plus any extra fields its terminals need.
macro_rules! builder {
    ($(#[$meta:meta])* $name:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        $(#[$meta])*
        pub struct $name<M = $crate::mode::Check> {
            pub(crate) path: ::volley_core::Address,
            $($field: $fty,)*
            _mode: ::std::marker::PhantomData<M>,
        }

        impl<M> $name<M> {
            pub(crate) fn at(path: ::volley_core::Address $(, $field: $fty)*) -> Self {
                Self {
                    path,
                    $($field,)*
                    _mode: ::std::marker::PhantomData,
                }
            }

            pub fn address(&self) -> &::volley_core::Address {
                &self.path
            }
        }
    };
}

pub(crate) use builder;
