//! Fluent assertions with expected/received output
//!
//! ```rust,ignore
//! expect!(response.status).to_equal(302);
//! expect!(response.text()).to_contain("No todos yet");
//! ```

use std::fmt::Debug;

#[track_caller]
fn fail(location: &str, matcher: &str, detail: String) -> ! {
    panic!(
        "\nassertion failed at {}\n  expect!(value).{}\n\n{}\n",
        location, matcher, detail
    );
}

/// Value under assertion; build it with the `expect!` macro
pub struct Expect<T> {
    value: T,
    location: &'static str,
}

impl<T> Expect<T> {
    pub fn new(value: T, location: &'static str) -> Self {
        Self { value, location }
    }
}

impl<T: Debug + PartialEq> Expect<T> {
    pub fn to_equal(&self, expected: T) {
        if self.value != expected {
            fail(
                self.location,
                "to_equal(expected)",
                format!("  Expected: {:?}\n  Received: {:?}", expected, self.value),
            );
        }
    }

    pub fn to_not_equal(&self, unexpected: T) {
        if self.value == unexpected {
            fail(
                self.location,
                "to_not_equal(value)",
                format!("  Expected NOT: {:?}\n  Received: {:?}", unexpected, self.value),
            );
        }
    }
}

impl Expect<bool> {
    pub fn to_be_true(&self) {
        if !self.value {
            fail(self.location, "to_be_true()", "  Received: false".to_string());
        }
    }

    pub fn to_be_false(&self) {
        if self.value {
            fail(self.location, "to_be_false()", "  Received: true".to_string());
        }
    }
}

impl<T: Debug> Expect<Option<T>> {
    pub fn to_be_some(&self) {
        if self.value.is_none() {
            fail(self.location, "to_be_some()", "  Received: None".to_string());
        }
    }

    pub fn to_be_none(&self) {
        if let Some(v) = &self.value {
            fail(self.location, "to_be_none()", format!("  Received: Some({:?})", v));
        }
    }
}

impl<T: Debug, E: Debug> Expect<Result<T, E>> {
    pub fn to_be_ok(&self) {
        if let Err(e) = &self.value {
            fail(self.location, "to_be_ok()", format!("  Received: Err({:?})", e));
        }
    }

    pub fn to_be_err(&self) {
        if let Ok(v) = &self.value {
            fail(self.location, "to_be_err()", format!("  Received: Ok({:?})", v));
        }
    }
}

fn contains(location: &str, haystack: &str, needle: &str) {
    if !haystack.contains(needle) {
        fail(
            location,
            "to_contain(substring)",
            format!("  Expected to contain: {:?}\n  Received: {:?}", needle, haystack),
        );
    }
}

fn not_contains(location: &str, haystack: &str, needle: &str) {
    if haystack.contains(needle) {
        fail(
            location,
            "to_not_contain(substring)",
            format!("  Expected NOT to contain: {:?}\n  Received: {:?}", needle, haystack),
        );
    }
}

impl Expect<String> {
    pub fn to_contain(&self, substring: &str) {
        contains(self.location, &self.value, substring);
    }

    pub fn to_not_contain(&self, substring: &str) {
        not_contains(self.location, &self.value, substring);
    }

    pub fn to_be_empty(&self) {
        if !self.value.is_empty() {
            fail(self.location, "to_be_empty()", format!("  Received: {:?}", self.value));
        }
    }
}

impl Expect<&str> {
    pub fn to_contain(&self, substring: &str) {
        contains(self.location, self.value, substring);
    }

    pub fn to_not_contain(&self, substring: &str) {
        not_contains(self.location, self.value, substring);
    }

    pub fn to_start_with(&self, prefix: &str) {
        if !self.value.starts_with(prefix) {
            fail(
                self.location,
                "to_start_with(prefix)",
                format!("  Expected to start with: {:?}\n  Received: {:?}", prefix, self.value),
            );
        }
    }
}

impl<T: Debug + PartialEq> Expect<Vec<T>> {
    pub fn to_have_length(&self, expected: usize) {
        if self.value.len() != expected {
            fail(
                self.location,
                &format!("to_have_length({})", expected),
                format!("  Actual length: {}\n  Received: {:?}", self.value.len(), self.value),
            );
        }
    }

    pub fn to_contain(&self, item: &T) {
        if !self.value.contains(item) {
            fail(
                self.location,
                "to_contain(item)",
                format!("  Expected to contain: {:?}\n  Received: {:?}", item, self.value),
            );
        }
    }

    pub fn to_be_empty(&self) {
        if !self.value.is_empty() {
            fail(self.location, "to_be_empty()", format!("  Received: {:?}", self.value));
        }
    }
}

impl<T: Debug + PartialOrd> Expect<T> {
    pub fn to_be_greater_than(&self, expected: T) {
        if self.value <= expected {
            fail(
                self.location,
                "to_be_greater_than(expected)",
                format!("  Expected: > {:?}\n  Received: {:?}", expected, self.value),
            );
        }
    }

    pub fn to_be_less_than(&self, expected: T) {
        if self.value >= expected {
            fail(
                self.location,
                "to_be_less_than(expected)",
                format!("  Expected: < {:?}\n  Received: {:?}", expected, self.value),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::expect;

    #[test]
    fn test_passing_matchers() {
        expect!(2 + 2).to_equal(4);
        expect!("hello world").to_contain("world");
        expect!("hello world").to_start_with("hello");
        expect!(String::from("abc")).to_not_contain("z");
        expect!(vec![1, 2, 3]).to_have_length(3);
        expect!(Some(1)).to_be_some();
        expect!(None::<u8>).to_be_none();
        expect!(Ok::<u8, ()>(1)).to_be_ok();
        expect!(5).to_be_greater_than(3);
    }

    #[test]
    #[should_panic(expected = "Received: 5")]
    fn test_failing_matcher_reports_received_value() {
        expect!(5).to_equal(6);
    }
}
