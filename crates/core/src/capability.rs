bitflags::bitflags! {
    /// What a component type can do, queried by traversal code instead of
    /// inspecting concrete types.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u16 {
        /// Owns an ordered list of child components.
        const CONTAINER = 1 << 0;
        /// Takes part in data binding.
        const BINDABLE = 1 << 1;
        /// Skipped by flattened views; its children are promoted instead.
        const INVISIBLE_CONTAINER = 1 << 2;
        /// Supplies data to binding components; never part of the visible content.
        const DATA_SOURCE = 1 << 3;
        const TEXT_LITERAL = 1 << 4;
        /// Placeholder that keeps a list position but is otherwise ignored.
        const NO_OP = 1 << 5;
        /// Gets its own layout engine during the layout pass.
        const VIEWPORT = 1 << 6;
        const SHAPE = 1 << 7;
        /// Prefixes the unique id of its descendants.
        const NAMING_CONTAINER = 1 << 8;
    }
}

impl Capabilities {
    pub fn is_container(self) -> bool {
        self.intersects(Capabilities::CONTAINER | Capabilities::INVISIBLE_CONTAINER)
    }

    /// Flattened views look through these
    pub fn is_transparent(self) -> bool {
        self.contains(Capabilities::INVISIBLE_CONTAINER)
    }

    /// Never listed by typed views
    pub fn is_hidden_from_views(self) -> bool {
        self.intersects(Capabilities::DATA_SOURCE | Capabilities::NO_OP)
    }
}
