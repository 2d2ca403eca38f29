#[macro_export]
macro_rules! emit_system_event {
    ($component:expr, $level:ident, $action:expr) => {{
        $crate::events::dispatcher::emit_system(
            $component,
            $crate::events::model::LogLevel::$level,
            $action,
            None,
        );
    }};
    ($component:expr, $level:ident, $action:expr, $($detail:tt)+) => {{
        $crate::events::dispatcher::emit_system(
            $component,
            $crate::events::model::LogLevel::$level,
            $action,
            Some(format!($($detail)+)),
        );
    }};
}
