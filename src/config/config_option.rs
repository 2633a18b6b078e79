use crate::types::err::{self};

/// A configuration value, together with a name and the range of permitted values.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }

    /// Sets the value of the option, if within the permitted range.
    pub fn set(&mut self, value: T) -> Result<(), err::ConfigError> {
        if value < self.min || self.max < value {
            log::error!("Value for {} out of range", self.name);
            return Err(err::ConfigError::OutOfRange(self.name));
        }
        self.value = value;
        Ok(())
    }
}

impl ConfigOption<bool> {
    /// A switch, on or off.
    pub const fn switch(name: &'static str, value: bool) -> Self {
        ConfigOption {
            name,
            min: false,
            max: true,
            value,
        }
    }
}

impl ConfigOption<u64> {
    /// A (non-negative) limit on checks.
    pub const fn limit(name: &'static str, value: u64) -> Self {
        ConfigOption {
            name,
            min: 0,
            max: u64::MAX,
            value,
        }
    }
}

#[cfg(test)]
mod config_option_tests {
    use super::*;

    #[test]
    fn range_checked() {
        let mut option = ConfigOption {
            name: "percent",
            min: 0_u32,
            max: 100,
            value: 70,
        };
        assert!(option.set(100).is_ok());
        assert_eq!(option.set(101), Err(err::ConfigError::OutOfRange("percent")));
        assert_eq!(option.value, 100);
    }
}
