// Unit tests harness
mod bound_method {
    include!("bound_method.rs");
}
mod unbound_method {
    include!("unbound_method.rs");
}
mod proc_bridge {
    include!("proc_bridge.rs");
}
mod lexical_binding {
    include!("lexical_binding.rs");
}
mod frame_stack {
    include!("frame_stack.rs");
}
