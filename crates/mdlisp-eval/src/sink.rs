/// Receives each line a program prints, in order.
///
/// Implemented for any `FnMut(&str)`, so a closure pushing into a `Vec`
/// is the usual way to capture output.
pub trait LineSink {
    fn emit(&mut self, line: &str);
}

impl<F: FnMut(&str)> LineSink for F {
    fn emit(&mut self, line: &str) {
        self(line)
    }
}
