// All engine events share the `overscroll` target.
#[cfg(feature = "tracing")]
macro_rules! olog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "overscroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! olog {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! otrace {
    ($($tt:tt)*) => { olog!(trace, $($tt)*) };
}

macro_rules! odebug {
    ($($tt:tt)*) => { olog!(debug, $($tt)*) };
}

macro_rules! owarn {
    ($($tt:tt)*) => { olog!(warn, $($tt)*) };
}
