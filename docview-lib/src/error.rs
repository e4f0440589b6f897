/// generates a `Context` trait that maps results and options into the given
/// error type with an attached message.
///
/// the implementations are left to the crate that owns the error type since
/// only it knows how to attach a source.
#[macro_export]
macro_rules! context_trait {
    ($e:path) => {
        pub trait Context<T, E> {
            fn context<C>(self, cxt: C) -> std::result::Result<T, $e>
            where
                C: Into<String>;
        }
    };
}
