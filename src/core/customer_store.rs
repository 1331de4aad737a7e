//! Customer storage
//!
//! This module provides the CustomerStore, the authoritative collection of
//! registered customers. Registration enforces username and email
//! uniqueness (case-sensitive exact match); loading runs every persisted
//! record through the same uniqueness path, so duplicates in a corrupted
//! file are dropped with a warning.
//!
//! Credential checks are plaintext comparisons on both fields. That is a
//! property of this system, not something to harden here.

use crate::io::storage::CustomerStorage;
use crate::types::{BillingError, Customer};

/// Authoritative collection of registered customers
pub struct CustomerStore {
    storage: Box<dyn CustomerStorage>,
    customers: Vec<Customer>,
}

impl CustomerStore {
    /// Open the store, hydrating from the backing storage
    ///
    /// Each loaded record goes through the registration uniqueness check;
    /// a record whose username or email is already taken is dropped with a
    /// warning.
    ///
    /// # Returns
    ///
    /// * `Ok(CustomerStore)` - Ready store (empty if the file was missing)
    /// * `Err(BillingError)` - The backing store was present but unreadable
    pub fn open(storage: Box<dyn CustomerStorage>) -> Result<Self, BillingError> {
        let mut store = CustomerStore {
            storage,
            customers: Vec::new(),
        };

        for customer in store.storage.load()? {
            if let Err(e) = store.insert_unique(customer) {
                log::warn!("dropping customer record from backing file: {}", e);
            }
        }
        Ok(store)
    }

    /// Register a new customer and persist the collection
    ///
    /// # Arguments
    ///
    /// * `username` - Must not be taken
    /// * `password` - Stored as-is (plaintext)
    /// * `email` - Must not be taken
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Registered and persisted
    /// * `Err(BillingError::DuplicateUsername)` - Username already exists
    /// * `Err(BillingError::DuplicateEmail)` - Email already exists
    /// * `Err(BillingError::Io)` - Persisting the collection failed
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<(), BillingError> {
        self.insert_unique(Customer::new(username, password, email))?;
        self.persist()
    }

    /// Remove a customer by exact username match and persist
    ///
    /// Silent no-op when the username is not registered.
    pub fn remove(&mut self, username: &str) -> Result<(), BillingError> {
        let before = self.customers.len();
        self.customers.retain(|c| c.username != username);
        if self.customers.len() == before {
            log::debug!("remove: customer '{}' not found, nothing to do", username);
            return Ok(());
        }
        self.persist()
    }

    /// Look a customer up by exact username match
    pub fn find_by_username(&self, username: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.username == username)
    }

    /// Whether a username is already registered
    pub fn is_username_taken(&self, username: &str) -> bool {
        self.customers.iter().any(|c| c.username == username)
    }

    /// Whether an email is already registered
    pub fn is_email_taken(&self, email: &str) -> bool {
        self.customers.iter().any(|c| c.email == email)
    }

    /// Whether the credentials match a registered customer exactly
    pub fn validate_login(&self, username: &str, password: &str) -> bool {
        self.load_customer(username, password).is_some()
    }

    /// The customer matching both credentials, if any
    pub fn load_customer(&self, username: &str, password: &str) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|c| c.username == username && c.password == password)
    }

    /// Every registered customer, in registration order
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Append a customer after the uniqueness checks, without persisting
    fn insert_unique(&mut self, customer: Customer) -> Result<(), BillingError> {
        if self.is_username_taken(&customer.username) {
            return Err(BillingError::duplicate_username(&customer.username));
        }
        if self.is_email_taken(&customer.email) {
            return Err(BillingError::duplicate_email(&customer.email));
        }
        self.customers.push(customer);
        Ok(())
    }

    fn persist(&self) -> Result<(), BillingError> {
        self.storage.save_all(&self.customers)
    }
}
