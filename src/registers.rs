// src/registers.rs
use crate::acquisition::ScopeError;

/// Integer type a register can hold. Raw values are range-checked, never truncated.
pub trait RegisterValue: Copy + Default + Into<i64> + TryFrom<i64> {
    const MAX: i64;

    fn from_raw(name: &str, raw: i64) -> Result<Self, ScopeError> {
        Self::try_from(raw).map_err(|_| ScopeError::InvalidRegisterAssignment {
            name: name.to_owned(),
            value: raw,
            max: Self::MAX,
        })
    }
}

impl RegisterValue for u8 {
    const MAX: i64 = u8::MAX as i64;
}
impl RegisterValue for u16 {
    const MAX: i64 = u16::MAX as i64;
}
impl RegisterValue for u32 {
    const MAX: i64 = u32::MAX as i64;
}
impl RegisterValue for i32 {
    const MAX: i64 = i32::MAX as i64;
}

type ChangeCallback<T> = Box<dyn FnMut(&str, T) + Send>;

/// Named configuration cell with change notification.
pub struct Register<T: RegisterValue> {
    name: String,
    value: T,
    callbacks: Vec<ChangeCallback<T>>,
}

pub type ByteRegister = Register<u8>;

impl<T: RegisterValue> Register<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_value(name, T::default())
    }
    pub fn with_value(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
            callbacks: Vec::new(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn get(&self) -> T {
        self.value
    }
    pub fn max_value(&self) -> i64 {
        T::MAX
    }
    pub fn set(&mut self, value: T) {
        self.value = value;
        for callback in &mut self.callbacks {
            callback(&self.name, value);
        }
    }
    /// Set from an untyped integer, e.g. a value decoded off the register bus.
    pub fn assign(&mut self, raw: i64) -> Result<(), ScopeError> {
        let value = T::from_raw(&self.name, raw)?;
        self.set(value);
        Ok(())
    }
    pub fn on_change(&mut self, callback: impl FnMut(&str, T) + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }
}

impl<T: RegisterValue + std::fmt::Debug> std::fmt::Debug for Register<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Register")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}
