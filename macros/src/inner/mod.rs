// Internal generators used by tola-delegate itself

pub mod arities;
