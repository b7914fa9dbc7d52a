pub mod filetime;
pub mod ldap;
pub mod zone;
