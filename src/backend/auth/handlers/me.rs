/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/v1/users/currentUser,
 * which returns information about the currently authenticated user.
 *
 * # Authentication
 *
 * The route sits behind `auth_middleware`, which has already verified the
 * token and loaded the user; this handler only projects it.
 */

use crate::backend::middleware::AuthUser;
use crate::shared::{ApiResponse, PublicUser};

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// {
///   "statusCode": 200,
///   "data": {
///     "id": "123e4567-e89b-12d3-a456-426614174000",
///     "name": "Ada",
///     "email": "ada@example.com",
///     "createdAt": "2024-05-01T12:00:00Z"
///   },
///   "message": "Current user fetched successfully",
///   "success": true
/// }
/// ```
pub async fn current_user(AuthUser(user): AuthUser) -> ApiResponse<PublicUser> {
    ApiResponse::ok(user.to_public(), "Current user fetched successfully")
}
