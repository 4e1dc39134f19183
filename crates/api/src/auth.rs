// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::{Duration, OffsetDateTime};
use tutoria_persistence::{Persistence, PersistenceError, SessionData, UserData};

use crate::error::AuthError;

/// Account roles for authorization.
///
/// Roles determine which side of the marketplace an authenticated user
/// acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Tutor role: accounts that publish availability and teach lessons.
    ///
    /// Tutors may:
    /// - create, toggle, and delete their own availabilities
    /// - generate class slots from an availability
    /// - cancel lessons they teach
    Tutor,
    /// Student role: accounts that book lessons.
    ///
    /// Students may:
    /// - browse active availabilities and open slots
    /// - book available slots
    /// - cancel lessons they attend
    Student,
}

impl Role {
    /// Returns the stored string form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tutor => "TUTOR",
            Self::Student => "STUDENT",
        }
    }

    /// Parses a stored role string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known role.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "TUTOR" => Ok(Self::Tutor),
            "STUDENT" => Ok(Self::Student),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {other}"),
            }),
        }
    }
}

/// An authenticated user with an associated role.
///
/// This represents an account that has presented a valid session and may
/// perform actions based on its role and ownership of the touched resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique identifier for this user.
    pub id: i64,
    /// The role assigned to this user.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this user
    /// * `role` - The role assigned to this user
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated user has permission to
/// perform a specific action based on their role. Ownership checks (is this
/// *my* availability, am I a party to this lesson) live with the operations
/// themselves, not here.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a user may create an availability.
    ///
    /// Only tutors publish availability.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Tutor role.
    pub fn authorize_create_availability(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Tutor => Ok(()),
            Role::Student => Err(AuthError::Unauthorized {
                action: String::from("create_availability"),
                required_role: String::from("Tutor"),
            }),
        }
    }

    /// Checks if a user may toggle an availability's active flag.
    ///
    /// Only tutors own availabilities.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Tutor role.
    pub fn authorize_update_availability(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Tutor => Ok(()),
            Role::Student => Err(AuthError::Unauthorized {
                action: String::from("update_availability"),
                required_role: String::from("Tutor"),
            }),
        }
    }

    /// Checks if a user may delete an availability.
    ///
    /// Only tutors own availabilities.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Tutor role.
    pub fn authorize_delete_availability(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Tutor => Ok(()),
            Role::Student => Err(AuthError::Unauthorized {
                action: String::from("delete_availability"),
                required_role: String::from("Tutor"),
            }),
        }
    }

    /// Checks if a user may generate class slots.
    ///
    /// Only tutors generate slots from their availabilities.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Tutor role.
    pub fn authorize_generate_slots(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Tutor => Ok(()),
            Role::Student => Err(AuthError::Unauthorized {
                action: String::from("generate_slots"),
                required_role: String::from("Tutor"),
            }),
        }
    }

    /// Checks if a user may book class slots.
    ///
    /// Only students book lessons.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Student role.
    pub fn authorize_book_slots(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Student => Ok(()),
            Role::Tutor => Err(AuthError::Unauthorized {
                action: String::from("book_slots"),
                required_role: String::from("Student"),
            }),
        }
    }

    /// Checks if a user may cancel a lesson.
    ///
    /// Both parties of a lesson may cancel it; the party check happens
    /// against the lesson itself.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have permission.
    pub const fn authorize_cancel_lesson(_user: &AuthenticatedUser) -> Result<(), AuthError> {
        // Both Tutor and Student may cancel their own lessons
        Ok(())
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user by email and password and creates a session.
    ///
    /// The same failure reason is returned for an unknown email and a wrong
    /// password so the response does not reveal which addresses have
    /// accounts.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The account email
    /// * `password` - The plain-text password to verify
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_user`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedUser, UserData), AuthError> {
        // Retrieve user by email
        let user: UserData = persistence
            .get_user_by_email(email)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            })?;

        // Verify password against the stored bcrypt hash
        let password_matches: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification error: {e}"),
            })?;

        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            });
        }

        // Check if the account is disabled
        if user.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        // Parse role
        let role: Role = Role::parse(&user.role)?;

        // Generate session token
        let session_token: String = Self::generate_session_token();

        // Calculate expiration time
        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        // Create session
        persistence
            .create_session(&session_token, user.user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        // Update last login timestamp
        persistence
            .update_last_login(user.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        let authenticated_user: AuthenticatedUser = AuthenticatedUser::new(user.user_id, role);

        Ok((session_token, authenticated_user, user))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_user`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedUser, UserData), AuthError> {
        // Retrieve session
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        // Check if session is expired
        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        // Retrieve user
        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        // Check if the account is disabled
        if user.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        // Parse role
        let role: Role = Role::parse(&user.role)?;

        // Update session activity
        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        let authenticated_user: AuthenticatedUser = AuthenticatedUser::new(user.user_id, role);

        Ok((authenticated_user, user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token.
    ///
    /// In a production system, this would use a cryptographically secure
    /// random number generator. For simplicity, we use a timestamp-based
    /// approach here.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(msg) | PersistenceError::SessionNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
