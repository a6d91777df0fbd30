//! Right-to-left function composition

/// A boxed unary function, consumed on use
pub type Unary<T> = Box<dyn FnOnce(T) -> T>;

/// Compose unary functions from right to left.
///
/// `compose(vec![f, g, h])(x)` is `f(g(h(x)))`. With no functions the result
/// is the identity; with one function that function is returned unchanged.
pub fn compose<T: 'static>(mut funcs: Vec<Unary<T>>) -> Unary<T> {
    match funcs.len() {
        0 => Box::new(|arg| arg),
        1 => funcs.remove(0),
        _ => Box::new(move |arg| funcs.into_iter().rev().fold(arg, |acc, f| f(acc))),
    }
}
