mod token_cookie;
