use crate::capability::Capabilities;
use crate::component::Component;
use quire_types::ObjectType;

/// Groups components without appearing in typed views of its parent's
/// content; its children are listed in its place.
#[derive(Debug, Default)]
pub struct PlaceHolder;

impl Component for PlaceHolder {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("holder")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::INVISIBLE_CONTAINER | Capabilities::BINDABLE
    }
}

/// Keeps a position in a list and is ignored by everything else.
#[derive(Debug, Default)]
pub struct NoOp;

impl Component for NoOp {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("noop")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NO_OP
    }
}
