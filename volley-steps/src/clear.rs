use volley_core::{Address, Step};

use crate::expect::{
    Expect, ExpectBody, ExpectBodyJson, ExpectBodyString, ExpectHeader, ExpectJsonPath,
    ExpectStatus,
};
use crate::mode::{clear_step, Clear};
use crate::send::{SendBody, SendHeader, SendQuery, SendRequest};

/// Starts a retraction of previously added steps.
///
/// Every builder reachable from here converts into a step that removes the whole subtree
/// under its address, e.g. `Step::from(clear().expect().status())`. Finishing the chain with
/// a terminal call such as `.equal(200)` only removes steps built with those exact arguments.
pub fn clear() -> ClearRoot {
    ClearRoot
}

pub struct ClearRoot;

impl ClearRoot {
    pub fn send(self) -> SendRequest<Clear> {
        SendRequest::at(Address::root("send"))
    }

    pub fn expect(self) -> Expect<Clear> {
        Expect::at(Address::root("expect"))
    }
}

macro_rules! clear_targets {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty<Clear>> for Step {
                #[track_caller]
                fn from(target: $ty<Clear>) -> Step {
                    clear_step(target.path)
                }
            }
        )*
    };
}

clear_targets!(
    SendRequest,
    SendHeader,
    SendQuery,
    SendBody,
    Expect,
    ExpectStatus,
    ExpectHeader,
    ExpectBody,
    ExpectBodyString,
    ExpectBodyJson,
    ExpectJsonPath,
);
