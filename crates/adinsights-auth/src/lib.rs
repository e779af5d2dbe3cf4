//  Copyright (c) 2026 Metaform Systems, Inc
//
//  This program and the accompanying materials are made available under the
//  terms of the Apache License, Version 2.0 which is available at
//  https://www.apache.org/licenses/LICENSE-2.0
//
//  SPDX-License-Identifier: Apache-2.0
//
//  Contributors:
//       Metaform Systems, Inc. - initial API and implementation
//

pub mod oauth;
pub mod shield;
pub mod token;

pub use oauth::{AuthError, AuthState, CallbackRedirect, OAuthConfig, OAuthFlowController};
pub use shield::{CredentialCheck, LoginShield, ShieldError, StaticCredentialCheck};
pub use token::{AccessToken, TokenStore};
